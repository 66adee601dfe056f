use crate::state::DEFAULT_MAX_CALL_DEPTH;
use crate::utils::config_loader::{
    LoadConfigError, SwapConfigLoader, SwapConfigLoaderSync, load_from_file, load_from_file_sync,
};
use crate::utils::constants::ARBITRUM_CHAIN_ID;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Root of the configuration file. Both sections are optional.
#[derive(Clone, Deserialize, Debug, Default)]
pub struct SwapExecutorConfig {
    #[serde(default)]
    pub executor: ExecutorConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// `[executor]` section
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutorConfig {
    /// Longest accepted call batch
    pub max_calls_per_batch: usize,
    /// Nesting limit of the simulated chain
    pub max_call_depth: usize,
    /// Return source tokens the batch did not spend
    pub refund_unspent_input: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { max_calls_per_batch: 32, max_call_depth: DEFAULT_MAX_CALL_DEPTH, refund_unspent_input: true }
    }
}

/// `[routing]` section
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingConfig {
    pub chain_id: u64,
    /// Tolerance applied to quotes, in basis points
    pub slippage_bps: u16,
    pub deadline_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self { chain_id: ARBITRUM_CHAIN_ID, slippage_bps: 100, deadline_secs: 1200 }
    }
}

impl RoutingConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}

#[async_trait]
impl SwapConfigLoader for SwapExecutorConfig {
    type SectionType = SwapExecutorConfig;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let config: SwapExecutorConfig = load_from_file(file_name).await?;
        config.validate()?;
        Ok(config)
    }
}

impl SwapConfigLoaderSync for SwapExecutorConfig {
    type SectionType = SwapExecutorConfig;

    fn load_section_from_file_sync(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        let config: SwapExecutorConfig = load_from_file_sync(file_name)?;
        config.validate()?;
        Ok(config)
    }
}

#[async_trait]
impl SwapConfigLoader for ExecutorConfig {
    type SectionType = ExecutorConfig;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        Ok(SwapExecutorConfig::load_section_from_file(file_name).await?.executor)
    }
}

impl SwapConfigLoaderSync for ExecutorConfig {
    type SectionType = ExecutorConfig;

    fn load_section_from_file_sync(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        Ok(SwapExecutorConfig::load_section_from_file_sync(file_name)?.executor)
    }
}

#[async_trait]
impl SwapConfigLoader for RoutingConfig {
    type SectionType = RoutingConfig;

    async fn load_section_from_file(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        Ok(SwapExecutorConfig::load_section_from_file(file_name).await?.routing)
    }
}

impl SwapConfigLoaderSync for RoutingConfig {
    type SectionType = RoutingConfig;

    fn load_section_from_file_sync(file_name: String) -> Result<Self::SectionType, LoadConfigError> {
        Ok(SwapExecutorConfig::load_section_from_file_sync(file_name)?.routing)
    }
}

impl SwapExecutorConfig {
    pub fn validate(&self) -> Result<(), LoadConfigError> {
        if self.executor.max_calls_per_batch == 0 {
            return Err(LoadConfigError::ConfigError("executor.max_calls_per_batch must be positive".to_string()));
        }
        if self.executor.max_call_depth == 0 {
            return Err(LoadConfigError::ConfigError("executor.max_call_depth must be positive".to_string()));
        }
        if self.routing.slippage_bps > 10_000 {
            return Err(LoadConfigError::ConfigError(format!(
                "routing.slippage_bps {} exceeds 10000",
                self.routing.slippage_bps
            )));
        }
        Ok(())
    }
}
