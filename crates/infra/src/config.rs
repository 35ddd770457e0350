//! Engine configuration loaded from the environment.
//!
//! | Variable                  | Default | Meaning                                   |
//! |---------------------------|---------|-------------------------------------------|
//! | `MENUPROFIT_LOG_FORMAT`   | `json`  | `json` or `text` log lines                |
//! | `MENUPROFIT_MARGIN_SCALE` | `4`     | decimal places kept on the profit ratio   |

use anyhow::{bail, Context};

use menuprofit_observability::LogFormat;
use menuprofit_profit::{DEFAULT_MARGIN_SCALE, MAX_MARGIN_SCALE};

pub const LOG_FORMAT_VAR: &str = "MENUPROFIT_LOG_FORMAT";
pub const MARGIN_SCALE_VAR: &str = "MENUPROFIT_MARGIN_SCALE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub log_format: LogFormat,
    /// Rounding scale applied to `profit / selling_price` before it is turned
    /// into a percentage.
    pub margin_scale: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Json,
            margin_scale: DEFAULT_MARGIN_SCALE,
        }
    }
}

impl EngineConfig {
    /// Load from process environment variables; unset variables use defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup (tests inject a map here).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw
                .parse()
                .with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?;
        }

        if let Some(raw) = lookup(MARGIN_SCALE_VAR) {
            let scale: u32 = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {MARGIN_SCALE_VAR}: '{raw}'"))?;
            if scale > MAX_MARGIN_SCALE {
                bail!("{MARGIN_SCALE_VAR} must be at most {MAX_MARGIN_SCALE}, got {scale}");
            }
            config.margin_scale = scale;
        }

        Ok(config)
    }
}
