use tradesim_core::Price;

/// Port for reading the live price of the traded instrument
///
/// The ledger reads through this port at the moment a trade executes, so it
/// never works from a cached price.
pub trait PriceSource {
    /// Symbol of the instrument being priced
    fn symbol(&self) -> &str;

    /// Current price
    fn current_price(&self) -> Price;
}
