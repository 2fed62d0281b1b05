use crate::core::AppConfig;

pub fn run(config: &AppConfig) {
    println!("{}", config.status());
}
