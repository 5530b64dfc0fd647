//! List rules command implementation.

use modlint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<22} Description", "Code", "Name");
    println!("{}", "-".repeat(78));

    for rule in all_rules() {
        println!(
            "{:<8} {:<22} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - ML001, ML002 (default)");
    println!("  strict       - recommended plus ML005");
    println!("\nML003 and ML004 activate when [[teams]] / [[layers]] are configured.");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  modlint check --rules no-circular-imports,no-self-import");
    println!("  modlint check --rules ML001,ML002");
}
