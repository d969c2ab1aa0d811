use folio_config::Config;
use folio_core_contact_impl::ContactFeatureConfig;
use folio_di::provider;
use folio_extern_impl::contact::ContactApiServiceConfig;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        ..config: ConfigProvider {
            // Extern
            ContactApiServiceConfig,

            // Core
            ContactFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider) -> Self {
        Self {
            _cache: Default::default(),
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // Extern
        contact_api_service_config: ContactApiServiceConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // Extern
        let contact_api_service_config = ContactApiServiceConfig::new(&config.backend.url)?;

        // Core
        let contact_feature_config = ContactFeatureConfig {
            success_title: config.contact.success_title.as_str().into(),
            failure_title: config.contact.failure_title.as_str().into(),
            failure_message: config.contact.failure_message.as_str().into(),
        };

        Ok(Self {
            _cache: Default::default(),

            // Extern
            contact_api_service_config,

            // Core
            contact_feature_config,
        })
    }
}
