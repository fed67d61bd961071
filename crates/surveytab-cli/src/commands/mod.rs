pub mod codebook;
pub mod describe;
pub mod init;
pub mod items;
pub mod validate;

use anyhow::Result;
use surveytab_core::config::{load_config_from, SurveytabConfig};
use surveytab_core::parser::{load_survey, Survey};

use crate::SurveyArgs;

impl SurveyArgs {
    /// Resolve the configuration, letting command-line paths win.
    pub fn config(&self) -> Result<SurveytabConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(dictionary) = &self.dictionary {
            config.dictionary = Some(dictionary.clone());
        }
        if let Some(dataset) = &self.dataset {
            config.dataset = Some(dataset.clone());
        }
        Ok(config)
    }
}

/// Read both survey tables named by the configuration.
pub fn load(config: &SurveytabConfig) -> Result<Survey> {
    load_survey(
        config.dictionary_path()?,
        config.dataset_path()?,
        &config.list_delimiter,
    )
}
