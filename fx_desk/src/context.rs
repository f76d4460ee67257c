//! Desk state shared by every calculator

use crate::calculator::{CalculationOutcome, CalculationRequest, DeskView};
use crate::config::DeskConfig;
use crate::preferences::Preferences;
use crate::quotes::RateSnapshot;
use crate::stats::UsageStats;
use crate::{DeskError, Result};
use fx_math::{Instrument, RateTable};
use log::{debug, info, warn};

/// Selected pair, reference rates and usage counters
#[derive(Debug, Clone)]
pub struct DeskContext {
    config: DeskConfig,
    selected_pair: Instrument,
    prices: RateTable,
    currencies: RateTable,
    stats: UsageStats,
}

impl DeskContext {
    /// Fresh desk on the built-in reference tables
    pub fn new(config: DeskConfig) -> Self {
        Self {
            selected_pair: config.default_pair.clone(),
            prices: RateTable::default_instrument_prices(),
            currencies: RateTable::default_currency_rates(),
            stats: UsageStats::default(),
            config,
        }
    }

    /// Desk restored from the configured rate snapshot and preferences file
    pub fn load(config: DeskConfig) -> Result<Self> {
        let mut desk = Self::new(config);

        if let Some(path) = desk.config.rates_path.clone() {
            info!("Loading rate snapshot from {}", path.display());
            desk.replace_rates(RateSnapshot::from_file(&path)?.into_rate_table()?);
        }

        if let Some(path) = desk.config.preferences_path.clone() {
            let prefs = Preferences::load(&path)?;
            desk.stats = prefs.stats;
            if let Err(e) = desk.select_pair(prefs.selected_pair) {
                warn!("Ignoring saved pair: {}", e);
            }
        }

        Ok(desk)
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    pub fn selected_pair(&self) -> &Instrument {
        &self.selected_pair
    }

    pub fn prices(&self) -> &RateTable {
        &self.prices
    }

    pub fn currencies(&self) -> &RateTable {
        &self.currencies
    }

    pub fn stats(&self) -> &UsageStats {
        &self.stats
    }

    /// Select a pair; it must have a reference price
    pub fn select_pair(&mut self, pair: Instrument) -> Result<()> {
        if self.prices.get(&pair.symbol()).is_none() {
            return Err(DeskError::UnknownInstrument(pair.symbol()));
        }
        debug!("Selected {}", pair);
        self.selected_pair = pair;
        Ok(())
    }

    /// Swap in new reference prices, e.g. from a feed snapshot
    pub fn replace_rates(&mut self, prices: RateTable) {
        info!("Loaded {} reference prices", prices.len());
        self.prices = prices;
        if self.prices.get(&self.selected_pair.symbol()).is_none() {
            warn!(
                "{} has no reference price in the new table, pricing it at the default rate",
                self.selected_pair
            );
        }
    }

    pub fn replace_currencies(&mut self, currencies: RateTable) {
        self.currencies = currencies;
    }

    /// Run one calculator, counting it on success
    pub fn calculate(&mut self, request: &CalculationRequest) -> Result<CalculationOutcome> {
        debug!("Running {} calculator", request.name());

        let view = DeskView {
            selected_pair: &self.selected_pair,
            prices: &self.prices,
            currencies: &self.currencies,
            account_currency: &self.config.account_currency,
        };

        match request.evaluate(&view) {
            Ok(outcome) => {
                self.stats.record(request.name());
                Ok(outcome)
            }
            Err(e) => {
                warn!("{} calculator rejected its inputs: {}", request.name(), e);
                Err(e.into())
            }
        }
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            selected_pair: self.selected_pair.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Persist preferences when a path is configured; returns whether anything was written
    pub fn save_preferences(&self) -> Result<bool> {
        match &self.config.preferences_path {
            Some(path) => {
                self.preferences().save(path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Default for DeskContext {
    fn default() -> Self {
        Self::new(DeskConfig::default())
    }
}
