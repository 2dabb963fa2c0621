use colored::Colorize;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Print the lampstack banner
pub fn banner() {
    println!(
        "{}",
        r"
  _                           _             _
 | | __ _ _ __ ___  _ __  ___| |_ __ _  ___| | __
 | |/ _` | '_ ` _ \| '_ \/ __| __/ _` |/ __| |/ /
 | | (_| | | | | | | |_) \__ \ || (_| | (__|   <
 |_|\__,_|_| |_| |_| .__/|___/\__\__,_|\___|_|\_\
                   |_|
"
        .cyan()
    );
}

/// Render a list as `a, b and c`.
pub fn join_human(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}
