//! Ledger Integration Test
//!
//! Runs the ledger against a live market simulator:
//! 1. Opening scenario at the initial price of 150
//! 2. Rejections never touch balance or holdings
//! 3. Buy followed by sell at an unchanged price is a no-op

use market_sim::{MarketConfig, MarketSimulator};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tradesim_core::{Quantity, Side};
use tradesim_portfolio::{Error, Ledger};

fn setup(seed: u64) -> (MarketSimulator, Ledger) {
    let _ = env_logger::try_init();
    let market = MarketSimulator::with_seed(MarketConfig::default(), seed).unwrap();
    let ledger = Ledger::new("MEOW", dec!(10000)).unwrap();
    (market, ledger)
}

#[test]
fn test_opening_scenario() {
    let (market, mut ledger) = setup(1);
    assert_eq!(market.price(), dec!(150));

    let buy = ledger.submit(Side::Buy, "10", &market).unwrap();
    assert_eq!(buy.amount, dec!(1500));
    assert_eq!(ledger.balance(), dec!(8500));
    assert_eq!(ledger.shares(), 10);
    assert_eq!(buy.to_string(), "Bought 10 shares of MEOW for $1500.00.");

    let sell = ledger.submit(Side::Sell, "5", &market).unwrap();
    assert_eq!(sell.amount, dec!(750));
    assert_eq!(ledger.balance(), dec!(9250));
    assert_eq!(ledger.shares(), 5);
    assert_eq!(sell.to_string(), "Sold 5 shares of MEOW for $750.00.");
}

#[test]
fn test_oversized_buy_rejected() {
    let (market, mut ledger) = setup(1);

    let err = ledger.submit(Side::Buy, "1000", &market).unwrap_err();
    assert!(matches!(err, Error::InsufficientFunds { .. }));
    assert_eq!(err.user_message(), "Insufficient balance.");
    assert_eq!(ledger.balance(), dec!(10000));
    assert_eq!(ledger.shares(), 0);
}

#[test]
fn test_invalid_quantities_never_change_state() {
    let (mut market, mut ledger) = setup(2);
    ledger.submit(Side::Buy, "20", &market).unwrap();
    market.tick();

    let balance = ledger.balance();
    let shares = ledger.shares();

    let inputs = ["0", "-1", "-250", "0.5", "3.75", "", "ten", "1,000"];
    for raw in inputs {
        for side in [Side::Buy, Side::Sell] {
            let err = ledger.submit(side, raw, &market).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{side} {raw:?} -> {err:?}");
        }
    }

    for value in [dec!(0), dec!(-3), dec!(0.25), dec!(7.5)] {
        assert!(Quantity::try_from(value).is_err());
    }

    assert_eq!(ledger.balance(), balance);
    assert_eq!(ledger.shares(), shares);
}

#[test]
fn test_buy_beyond_balance_never_changes_state() {
    let (mut market, mut ledger) = setup(3);

    for _ in 0..50 {
        market.tick();
        let price = market.price();
        // Smallest quantity whose cost exceeds the balance
        let too_many = (ledger.balance() / price).floor() + Decimal::ONE;
        let quantity = Quantity::try_from(too_many).unwrap();

        let before = (ledger.balance(), ledger.shares());
        assert!(matches!(
            ledger.buy(quantity, &market),
            Err(Error::InsufficientFunds { .. })
        ));
        assert_eq!((ledger.balance(), ledger.shares()), before);
    }
}

#[test]
fn test_sell_beyond_holdings_never_changes_state() {
    let (mut market, mut ledger) = setup(4);
    ledger.submit(Side::Buy, "7", &market).unwrap();

    for extra in 1..=20u64 {
        market.tick();
        let quantity = Quantity::new(ledger.shares() + extra).unwrap();
        let before = (ledger.balance(), ledger.shares());

        assert!(matches!(
            ledger.sell(quantity, &market),
            Err(Error::InsufficientHoldings { .. })
        ));
        assert_eq!((ledger.balance(), ledger.shares()), before);
    }
}

#[test]
fn test_round_trip_restores_state() {
    let (mut market, mut ledger) = setup(5);

    for q in 1..=30u64 {
        market.tick();
        let before = (ledger.balance(), ledger.shares());
        let quantity = Quantity::new(q).unwrap();

        let Ok(bought) = ledger.buy(quantity, &market) else {
            continue;
        };
        let sold = ledger.sell(quantity, &market).unwrap();

        assert_eq!(bought.amount, sold.amount);
        assert_eq!((ledger.balance(), ledger.shares()), before);
    }
}
