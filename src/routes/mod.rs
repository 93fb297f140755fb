pub(crate) mod health;
pub(crate) mod prices;
pub(crate) mod valuation;
pub(crate) mod ui;
