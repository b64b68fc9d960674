//! Mint transaction construction.
//!
//! Turns a [`TokenRequest`] plus the pinned metadata URI into the ordered
//! instruction sequence for one mint:
//!
//! 1. create the mint account (rent-exempt)
//! 2. initialize the mint (freeze authority omitted when revoked)
//! 3. create the payer's associated token account
//! 4. mint the full supply into it
//! 5. create the on-chain metadata account
//! 6. revoke the mint authority (only when requested)
//!
//! A fresh mint keypair is generated on every call; it signs once for its
//! own creation and is discarded with the attempt.

use solana_sdk::{
    instruction::Instruction, pubkey::Pubkey, signature::Keypair, signer::Signer,
    system_instruction,
};
use spl_token::solana_program::program_pack::Pack;
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account,
};
use spl_token::instruction::AuthorityType;
use spl_token::state::Mint;

use mpl_token_metadata::accounts::Metadata;
use mpl_token_metadata::instructions::CreateMetadataAccountV3Builder;
use mpl_token_metadata::types::{Creator, DataV2};

use crate::config::TOKEN_DECIMALS;
use crate::error::BuilderError;
use crate::types::TokenRequest;

/// A fully constructed (but unsigned) mint plan.
pub struct MintPlan {
    /// Instructions in submission order.
    pub instructions: Vec<Instruction>,
    /// The freshly generated mint identity; must co-sign the transaction.
    pub mint: Keypair,
    /// The payer's associated token account receiving the supply.
    pub token_account: Pubkey,
    /// The derived metadata account.
    pub metadata_account: Pubkey,
    /// Whether the on-chain metadata stays mutable.
    pub metadata_is_mutable: bool,
}

impl MintPlan {
    pub fn mint_address(&self) -> Pubkey {
        self.mint.pubkey()
    }
}

/// Space the mint account needs, in bytes. Exposed so the pipeline can ask
/// the ledger for the matching rent-exemption balance.
pub const MINT_ACCOUNT_SPACE: usize = Mint::LEN;

/// Parse the user-supplied supply and scale it to raw units.
///
/// The result is `supply × 10^9`, computed with integer checked math - a
/// supply of 10^9 tokens scales to exactly 10^18 raw units with no rounding.
pub fn parse_supply(raw: &str) -> Result<u64, BuilderError> {
    let trimmed = raw.trim();
    let supply: u64 = trimmed
        .parse()
        .map_err(|_| BuilderError::InvalidSupply(raw.to_string()))?;
    if supply == 0 {
        return Err(BuilderError::InvalidSupply(raw.to_string()));
    }
    supply
        .checked_mul(10u64.pow(TOKEN_DECIMALS as u32))
        .ok_or_else(|| BuilderError::InvalidSupply(raw.to_string()))
}

/// Build the instruction sequence for one mint attempt.
///
/// `rent_lamports` is the rent-exemption balance for [`MINT_ACCOUNT_SPACE`],
/// fetched from the ledger by the caller.
pub fn build_mint_plan(
    payer: &Pubkey,
    request: &TokenRequest,
    metadata_uri: &str,
    rent_lamports: u64,
) -> Result<MintPlan, BuilderError> {
    let raw_amount = parse_supply(&request.supply)?;

    let mint = Keypair::new();
    let mint_address = mint.pubkey();

    let create_mint_account = system_instruction::create_account(
        payer,
        &mint_address,
        rent_lamports,
        MINT_ACCOUNT_SPACE as u64,
        &spl_token::id(),
    );

    // Freeze authority is absent (not a zero address) when revoked.
    let freeze_authority = if request.revoke_freeze_authority {
        None
    } else {
        Some(payer)
    };
    let initialize_mint = spl_token::instruction::initialize_mint(
        &spl_token::id(),
        &mint_address,
        payer,
        freeze_authority,
        TOKEN_DECIMALS,
    )
    .map_err(|e| BuilderError::Instruction(e.to_string()))?;

    let token_account = get_associated_token_address(payer, &mint_address);
    let create_token_account =
        create_associated_token_account(payer, payer, &mint_address, &spl_token::id());

    let mint_supply = spl_token::instruction::mint_to(
        &spl_token::id(),
        &mint_address,
        &token_account,
        payer,
        &[],
        raw_amount,
    )
    .map_err(|e| BuilderError::Instruction(e.to_string()))?;

    let (metadata_account, _) = Metadata::find_pda(&mint_address);
    let metadata_is_mutable = !request.revoke_update_authority;
    let create_metadata = CreateMetadataAccountV3Builder::new()
        .metadata(metadata_account)
        .mint(mint_address)
        .mint_authority(*payer)
        .payer(*payer)
        .update_authority(*payer, true)
        .data(DataV2 {
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            uri: metadata_uri.to_string(),
            seller_fee_basis_points: 0,
            creators: Some(vec![Creator {
                address: *payer,
                verified: true,
                share: 100,
            }]),
            collection: None,
            uses: None,
        })
        .is_mutable(metadata_is_mutable)
        .instruction();

    let mut instructions = vec![
        create_mint_account,
        initialize_mint,
        create_token_account,
        mint_supply,
        create_metadata,
    ];

    // Fixed supply: nobody can mint again once the authority is gone.
    if request.revoke_mint_authority {
        let revoke = spl_token::instruction::set_authority(
            &spl_token::id(),
            &mint_address,
            None,
            AuthorityType::MintTokens,
            payer,
            &[],
        )
        .map_err(|e| BuilderError::Instruction(e.to_string()))?;
        instructions.push(revoke);
    }

    Ok(MintPlan {
        instructions,
        mint,
        token_account,
        metadata_account,
        metadata_is_mutable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use spl_token::instruction::TokenInstruction;
    use spl_token::solana_program::program_option::COption;

    fn request(supply: &str) -> TokenRequest {
        TokenRequest {
            name: "Foo".into(),
            symbol: "FOO".into(),
            supply: supply.into(),
            ..Default::default()
        }
    }

    fn payer() -> Pubkey {
        Pubkey::new_unique()
    }

    #[test]
    fn test_supply_scaling_is_integer_exact() {
        assert_eq!(parse_supply("1000").unwrap(), 1_000_000_000_000);
        // 10^9 tokens scale to exactly 10^18 raw units.
        assert_eq!(parse_supply("1000000000").unwrap(), 1_000_000_000_000_000_000);
        // Largest supply that fits in a u64 at 9 decimals.
        assert_eq!(
            parse_supply("18446744073").unwrap(),
            18_446_744_073_000_000_000
        );
    }

    #[test]
    fn test_supply_rejections() {
        assert!(matches!(
            parse_supply("0"),
            Err(BuilderError::InvalidSupply(_))
        ));
        assert!(matches!(
            parse_supply("abc"),
            Err(BuilderError::InvalidSupply(_))
        ));
        assert!(matches!(
            parse_supply("-5"),
            Err(BuilderError::InvalidSupply(_))
        ));
        assert!(matches!(
            parse_supply("1.5"),
            Err(BuilderError::InvalidSupply(_))
        ));
        // Overflows u64 once scaled by 10^9.
        assert!(matches!(
            parse_supply("18446744074"),
            Err(BuilderError::InvalidSupply(_))
        ));
    }

    #[test]
    fn test_instruction_order() {
        let plan = build_mint_plan(&payer(), &request("1000"), "ipfs://meta", 1_461_600).unwrap();

        assert_eq!(plan.instructions.len(), 5);
        assert_eq!(
            plan.instructions[0].program_id,
            solana_sdk::system_program::id()
        );
        assert_eq!(plan.instructions[1].program_id, spl_token::id());
        assert_eq!(
            plan.instructions[2].program_id,
            spl_associated_token_account::id()
        );
        assert_eq!(plan.instructions[3].program_id, spl_token::id());
        assert_eq!(plan.instructions[4].program_id, mpl_token_metadata::ID);
    }

    #[test]
    fn test_freeze_authority_present_by_default() {
        let owner = payer();
        let plan = build_mint_plan(&owner, &request("1"), "uri", 0).unwrap();

        match TokenInstruction::unpack(&plan.instructions[1].data).unwrap() {
            TokenInstruction::InitializeMint {
                decimals,
                mint_authority,
                freeze_authority,
            } => {
                assert_eq!(decimals, TOKEN_DECIMALS);
                assert_eq!(mint_authority, owner);
                assert_eq!(freeze_authority, COption::Some(owner));
            }
            other => panic!("unexpected instruction: {:?}", other),
        }
    }

    #[test]
    fn test_freeze_revocation_omits_authority() {
        let mut req = request("1");
        req.revoke_freeze_authority = true;
        let plan = build_mint_plan(&payer(), &req, "uri", 0).unwrap();

        match TokenInstruction::unpack(&plan.instructions[1].data).unwrap() {
            TokenInstruction::InitializeMint {
                freeze_authority, ..
            } => assert_eq!(freeze_authority, COption::None),
            other => panic!("unexpected instruction: {:?}", other),
        }
    }

    #[test]
    fn test_minted_amount_matches_scaled_supply() {
        let plan = build_mint_plan(&payer(), &request("123456789"), "uri", 0).unwrap();

        match TokenInstruction::unpack(&plan.instructions[3].data).unwrap() {
            TokenInstruction::MintTo { amount } => {
                assert_eq!(amount, 123_456_789_000_000_000)
            }
            other => panic!("unexpected instruction: {:?}", other),
        }
    }

    #[test]
    fn test_mint_authority_revocation_appended() {
        let mut req = request("1");
        req.revoke_mint_authority = true;
        let plan = build_mint_plan(&payer(), &req, "uri", 0).unwrap();

        assert_eq!(plan.instructions.len(), 6);
        match TokenInstruction::unpack(&plan.instructions[5].data).unwrap() {
            TokenInstruction::SetAuthority {
                authority_type,
                new_authority,
            } => {
                assert_eq!(authority_type, AuthorityType::MintTokens);
                assert_eq!(new_authority, COption::None);
            }
            other => panic!("unexpected instruction: {:?}", other),
        }
    }

    #[test]
    fn test_metadata_pda_derivation() {
        let plan = build_mint_plan(&payer(), &request("1"), "uri", 0).unwrap();

        let expected = Pubkey::find_program_address(
            &[
                b"metadata",
                mpl_token_metadata::ID.as_ref(),
                plan.mint_address().as_ref(),
            ],
            &mpl_token_metadata::ID,
        )
        .0;
        assert_eq!(plan.metadata_account, expected);
    }

    #[test]
    fn test_mutability_is_negated_revoke_flag() {
        let plan = build_mint_plan(&payer(), &request("1"), "uri", 0).unwrap();
        assert!(plan.metadata_is_mutable);

        let mut req = request("1");
        req.revoke_update_authority = true;
        let plan = build_mint_plan(&payer(), &req, "uri", 0).unwrap();
        assert!(!plan.metadata_is_mutable);
    }

    #[test]
    fn test_fresh_mint_identity_per_invocation() {
        let owner = payer();
        let a = build_mint_plan(&owner, &request("1"), "uri", 0).unwrap();
        let b = build_mint_plan(&owner, &request("1"), "uri", 0).unwrap();
        assert_ne!(a.mint_address(), b.mint_address());
    }
}
