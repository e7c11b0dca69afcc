use shelterwish::registry::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), RegistryError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client = RegistryClient::new(RegistryConfig::from_env()?)?;

    let nip = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "5260250995".into());
    println!("=== VAT whitelist: {nip} ===\n");

    match client.lookup_nip_today(&nip).await {
        Ok(subject) => {
            println!("  name:    {}", subject.name);
            println!("  status:  {:?}", subject.vat_status);
            println!("  address: {}", subject.address.as_deref().unwrap_or("—"));

            if let Some(krs) = &subject.krs {
                println!("\n=== KRS: {krs} ===\n");
                match client.lookup_krs(krs).await {
                    Ok(entity) => {
                        println!("  name:  {}", entity.name);
                        println!("  form:  {}", entity.legal_form.as_deref().unwrap_or("—"));
                        println!("  city:  {}", entity.city.as_deref().unwrap_or("—"));
                    }
                    Err(e) => println!("  KRS lookup failed: {e}"),
                }
            }
        }
        Err(e) => println!("  lookup failed: {e}"),
    }

    Ok(())
}
