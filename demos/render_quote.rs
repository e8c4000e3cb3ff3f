//! Quote Renderer Demo
//!
//! Fills the quote form with a sample client and saves the PDF.
//!
//! Usage:
//!   cargo run -p orcamento --example render_quote -- [output_dir] [profile.json]
//!
//! Examples:
//!   cargo run -p orcamento --example render_quote
//!   RUST_LOG=debug cargo run -p orcamento --example render_quote -- output assets/profile.json

use anyhow::Context;
use orcamento::{CompanyProfile, DirectorySink, Field, FileLogo, FormController};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().collect();
    let output_dir = args.get(1).map(String::as_str).unwrap_or("output");

    let profile = match args.get(2) {
        Some(path) => CompanyProfile::from_file(path)
            .with_context(|| format!("Failed to load profile {path}"))?,
        None => CompanyProfile::default(),
    };

    let logo = FileLogo::new(&profile.logo_path);
    let mut form = FormController::new(profile, logo, DirectorySink::new(output_dir));

    form.on_field_change(Field::ClientName, "Maria Souza");
    form.on_field_change(Field::ClientPhone, "21980202797");
    form.on_field_change(Field::ClientCpf, "12345678900");
    form.on_field_change(Field::Model, "Series 11 Ultra (49mm)");
    form.on_field_change(Field::Color, "Preto");
    form.on_field_change(Field::ProductValue, "189900");
    form.on_accessory_toggle("+Brindes promoção (atual)", true);

    let record = form.record();
    println!("Quote:  {}", record.quote_number);
    println!("Model:  {}", record.display_model());
    println!("Total:  {}", record.total());

    if let Err(e) = form.submit().await {
        let message = e.user_message().unwrap_or_else(|| e.to_string());
        anyhow::bail!("{message} ({e})");
    }

    println!("Saved to {output_dir}/");
    Ok(())
}
