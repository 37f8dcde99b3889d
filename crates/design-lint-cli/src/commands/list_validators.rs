//! List validators command implementation.

use design_lint_core::validators::builtin_validators;

/// Runs the list-validators command.
pub fn run() {
    println!("Available validators:\n");
    println!("{:<8} {:<22} {:<12} Description", "Code", "Name", "Scope");
    println!("{}", "-".repeat(90));

    for validator in builtin_validators() {
        println!(
            "{:<8} {:<22} {:<12} {}",
            validator.code(),
            validator.name(),
            validator.scope().to_string(),
            validator.description()
        );
    }

    println!("\nAudit types:");
    println!("  system            - every validator (default)");
    println!("  variables-styles  - collection-structure, text-style-sync, text-style-bindings");
    println!("  components        - component-bindings");

    println!("\nDisable a validator in design-lint.toml:");
    println!("  [validators.component-bindings]");
    println!("  enabled = false");
}
