//! Providers command - show the configured chain

use crate::config::AppConfig;
use crate::domain::ProviderSet;
use crate::infrastructure::providers::EnvProviderLoader;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let providers = EnvProviderLoader::from_env().load(&config.chat.provider_order)?;
    print!("{}", describe(&providers));
    Ok(())
}

/// One line per provider; credentials are never printed
fn describe(providers: &ProviderSet) -> String {
    let mut out = String::new();

    for (position, descriptor) in providers.all().iter().enumerate() {
        let status = if descriptor.is_enabled() {
            "enabled"
        } else {
            "disabled (no credential)"
        };

        out.push_str(&format!(
            "{}. {:<12} {:<24} {:<8} timeout={}ms  {}\n",
            position + 1,
            descriptor.name(),
            descriptor.model(),
            descriptor.kind().as_str(),
            descriptor.timeout().as_millis(),
            status
        ));
    }

    out.push_str(&format!("{}. {:<12} always available\n", providers.len() + 1, "local"));
    out
}
