use shelterwish::core::*;

fn main() {
    // NIP validation (no network required)
    println!("=== NIP Validation ===\n");

    let test_nips = [
        "5260001246",
        "526-000-12-46",
        " 526 000 12 46 ",
        "5260001247", // wrong check digit
        "1234567890", // remainder 10
        "526000124",  // too short
        "PL5260001246",
    ];

    for nip in &test_nips {
        match Nip::parse(nip) {
            Ok(parsed) => println!("  {nip:>16} => valid ({parsed})"),
            Err(e) => println!("  {nip:>16} => INVALID: {e}"),
        }
    }

    println!("\n=== Formatting ===\n");

    for raw in ["5260001246", "1234567890", "abc"] {
        println!("  {raw:>12} => {}", format_nip(raw));
    }

    println!("\n=== Organization profile ===\n");

    let result = OrganizationProfileBuilder::new("Fundacja Psi Azyl", "526-000-12-47")
        .email("kontakt@psiazyl")
        .address("ul. Leśna 4", "00950", "Warszawa")
        .build();
    match result {
        Ok(p) => println!("  {} => valid", p.name),
        Err(e) => println!("  rejected: {e}"),
    }
}
