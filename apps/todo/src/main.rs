//! Simple CLI demo for the todo store.
//!
//! Bootstraps a store, runs a short scripted session against it and prints
//! the devtools log as JSON lines.

use anyhow::Context;
use chrono::{Duration, Utc};
use entity_store_runtime::{metrics::describe_store_metrics, StoreConfig};
use todo::{NewTodo, TodoId, TodoStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_todos(store: &TodoStore) {
    for todo in store.todos() {
        let status = if todo.finished { "✓" } else { " " };
        match &todo.description {
            Some(description) => println!("  {:>3} [{status}] {} ({description})", todo.id.get(), todo.name),
            None => println!("  {:>3} [{status}] {}", todo.id.get(), todo.name),
        }
    }
    println!("  finished: {}/{}", store.finished_count(), store.len());
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=debug,entity_store_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    describe_store_metrics();

    let config = StoreConfig::from_env()
        .context("reading store configuration")?
        .with_name(todo::store::STORE_NAME);

    println!("=== Todo Store ===\n");

    let mut store = TodoStore::builder().config(config).build()?;
    store.subscribe(|state| {
        tracing::info!(todos = state.len(), finished = state.finished_count(), "State changed");
    });

    println!("Seeded todos:");
    print_todos(&store);

    println!("\nAdding 'Buy milk'...");
    let milk = store.add(
        NewTodo::new("Buy milk")
            .with_description("oat, 2 litres")
            .with_deadline(Utc::now() + Duration::days(1)),
    )?;

    println!("Finishing 'Buy milk'...");
    store.toggle_finished(milk)?;

    println!("Removing 'Go for a Walk' twice...");
    store.remove(TodoId::new(1))?;
    store.remove(TodoId::new(1))?;

    println!("Toggling a todo that does not exist...");
    match store.toggle_finished(TodoId::new(999)) {
        Ok(()) => println!("  unexpectedly succeeded"),
        Err(error) => println!("  rejected: {error}"),
    }

    println!("\nCurrent todos:");
    print_todos(&store);

    if let Some(devtools) = store.devtools() {
        println!("\nDevtools log '{}':", devtools.name());
        for entry in devtools.entries() {
            println!("{}", serde_json::to_string(entry)?);
        }
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
