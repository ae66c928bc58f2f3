use sale_runtime::{
    Address, CallParams, CappedToken, DeliveryMethod, DeliveryParams, ResendPolicy, SaleParams,
    Timestamp, TokenAmount, Wei, WorldState,
};

pub const OWNER: Address = [1u8; 32];
pub const WALLET: Address = [2u8; 32];
pub const INVESTOR: Address = [3u8; 32];
pub const PURCHASER: Address = [4u8; 32];
pub const THIRD_PARTY: Address = [5u8; 32];
pub const TOKEN: Address = [6u8; 32];
pub const SALE: Address = [7u8; 32];
pub const LEDGER: Address = [8u8; 32];
pub const DELIVERY: Address = [9u8; 32];

pub const ETHER: Wei = 1_000_000_000_000_000_000;
pub const RATE: u128 = 1000;
pub const SALE_CAP: Wei = ETHER;
pub const MINIMUM_CONTRIBUTION: Wei = ETHER / 5;
pub const TOKEN_CAP: TokenAmount = 10_000 * ETHER;

pub const WEEK: Timestamp = 7 * 24 * 60 * 60;
pub const GENESIS_TIME: Timestamp = 1_000_000;
pub const OPENING_TIME: Timestamp = GENESIS_TIME + WEEK;
pub const CLOSING_TIME: Timestamp = OPENING_TIME + WEEK;

pub struct TestData {}

impl TestData {
    pub fn sale_params() -> SaleParams {
        SaleParams {
            owner: OWNER,
            rate: RATE,
            wallet: WALLET,
            token: TOKEN,
            delivery: DeliveryMethod::Mint,
            opening_time: OPENING_TIME,
            closing_time: CLOSING_TIME,
            funding_cap: SALE_CAP,
            minimum_contribution: MINIMUM_CONTRIBUTION,
        }
    }

    pub fn delivery_params(resend_policy: ResendPolicy) -> DeliveryParams {
        DeliveryParams {
            owner: OWNER,
            token: TOKEN,
            cap: 10_000,
            resend_policy,
            strategy: DeliveryMethod::Transfer,
        }
    }

    /// A deployment with a minted-delivery sale wired as token minter and
    /// ledger operator, and a handful of funded accounts.
    pub fn sale_world() -> WorldState<CappedToken> {
        let mut ws = WorldState::new(LEDGER, OWNER);
        ws.add_token(TOKEN, CappedToken::new(OWNER, TOKEN_CAP).unwrap())
            .unwrap();
        ws.register_sale(SALE, Self::sale_params(), GENESIS_TIME)
            .unwrap();
        ws.token_mut(&TOKEN).unwrap().add_minter(&OWNER, SALE).unwrap();
        ws.ledger_mut().add_operator(&OWNER, SALE).unwrap();
        ws.add_account(INVESTOR, 10 * ETHER);
        ws.add_account(PURCHASER, 10 * ETHER);
        ws
    }

    pub fn call_params(signer: Address, timestamp: Timestamp) -> CallParams {
        CallParams { signer, timestamp }
    }
}
