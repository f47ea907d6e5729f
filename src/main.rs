//! Command-line interface for wsdl2

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use wsdl2::{Description, Diagnostic, Reader, Severity};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "wsdl2")]
#[command(author, version, about = "WSDL 2.0 description reader", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Read a WSDL 2.0 description and display its components
    Inspect {
        /// Path or URI of the WSDL document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,

        /// Run the validators after reading
        #[arg(long)]
        validate: bool,
    },
}

#[cfg(feature = "cli")]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect {
            file,
            json,
            validate,
        } => cmd_inspect(file, json, validate),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the description was read without errors
#[cfg(feature = "cli")]
fn cmd_inspect(
    file: PathBuf,
    json_output: bool,
    validate: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let mut reader = Reader::new().with_validation(validate);
    let set = reader.read_uri(&file.to_string_lossy())?;
    let description = set.to_component();
    let diagnostics = reader.diagnostics();

    if json_output {
        print_description_json(&description, diagnostics)?;
    } else {
        print_description_summary(&description, diagnostics);
    }

    Ok(!diagnostics.iter().any(|d| d.severity >= Severity::Error))
}

#[cfg(feature = "cli")]
fn display_name<T: ToString>(name: Option<T>) -> String {
    name.map(|n| n.to_string())
        .unwrap_or_else(|| "(unnamed)".to_string())
}

#[cfg(feature = "cli")]
fn print_description_summary(description: &Description<'_>, diagnostics: &[Diagnostic]) {
    println!("wsdl2 v{}", wsdl2::VERSION);
    println!();
    println!("Description:");
    println!("  Document: {}", description.to_element().document_base_uri());
    match description.target_namespace() {
        Some(ns) => println!("  Target Namespace: {}", ns),
        None => println!("  Target Namespace: (none)"),
    }
    println!("  Documents Read: {}", description.set().len());

    println!("\n=== Interfaces ===");
    for interface in description.interfaces() {
        println!("  {}", display_name(interface.name()));
        for operation in interface.all_interface_operations() {
            println!(
                "    {} [{}]",
                display_name(operation.name()),
                operation.message_exchange_pattern()
            );
        }
    }

    println!("\n=== Bindings ===");
    for binding in description.bindings() {
        let interface = binding.interface().and_then(|i| i.name());
        println!(
            "  {} : {} ({})",
            display_name(binding.name()),
            display_name(interface),
            binding.binding_type().unwrap_or("no type")
        );
    }

    println!("\n=== Services ===");
    for service in description.services() {
        println!("  {}", display_name(service.name()));
        for endpoint in service.endpoints() {
            println!(
                "    {} -> {}",
                display_name(endpoint.name()),
                endpoint.address().unwrap_or("(no address)")
            );
        }
    }

    if !diagnostics.is_empty() {
        println!("\n=== Diagnostics ===");
        for diagnostic in diagnostics {
            println!("  {}", diagnostic);
        }
    }
}

#[cfg(feature = "cli")]
fn print_description_json(
    description: &Description<'_>,
    diagnostics: &[Diagnostic],
) -> Result<(), Box<dyn std::error::Error>> {
    use serde_json::{json, Map, Value};

    let mut output = Map::new();

    output.insert(
        "document".to_string(),
        json!(description.to_element().document_base_uri()),
    );
    output.insert(
        "targetNamespace".to_string(),
        json!(description.target_namespace()),
    );
    output.insert("documents".to_string(), json!(description.set().len()));

    let interfaces: Vec<Value> = description
        .interfaces()
        .into_iter()
        .map(|interface| {
            let operations: Vec<Value> = interface
                .all_interface_operations()
                .into_iter()
                .map(|operation| {
                    json!({
                        "name": operation.name().map(|n| n.to_string()),
                        "pattern": operation.message_exchange_pattern(),
                        "style": operation.style(),
                    })
                })
                .collect();
            json!({
                "name": interface.name().map(|n| n.to_string()),
                "operations": operations,
            })
        })
        .collect();
    output.insert("interfaces".to_string(), Value::Array(interfaces));

    let bindings: Vec<Value> = description
        .bindings()
        .into_iter()
        .map(|binding| {
            let operations: Vec<Value> = binding
                .binding_operations()
                .into_iter()
                .map(|operation| json!(operation.reference().map(|r| r.to_string())))
                .collect();
            json!({
                "name": binding.name().map(|n| n.to_string()),
                "interface": binding.interface().and_then(|i| i.name()).map(|n| n.to_string()),
                "type": binding.binding_type(),
                "operations": operations,
            })
        })
        .collect();
    output.insert("bindings".to_string(), Value::Array(bindings));

    let services: Vec<Value> = description
        .services()
        .into_iter()
        .map(|service| {
            let endpoints: Vec<Value> = service
                .endpoints()
                .into_iter()
                .map(|endpoint| {
                    json!({
                        "name": endpoint.name().map(|n| n.to_string()),
                        "binding": endpoint.binding().and_then(|b| b.name()).map(|n| n.to_string()),
                        "address": endpoint.address(),
                    })
                })
                .collect();
            json!({
                "name": service.name().map(|n| n.to_string()),
                "endpoints": endpoints,
            })
        })
        .collect();
    output.insert("services".to_string(), Value::Array(services));

    output.insert("diagnostics".to_string(), serde_json::to_value(diagnostics)?);

    let json_str = serde_json::to_string_pretty(&Value::Object(output))?;
    println!("{}", json_str);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
