//! Welcome banner display for chat sessions.

use console::style;

/// Assistant name shown in the banner and help text.
pub const ASSISTANT_NAME: &str = "Robotics Learning Assistant";

/// Print the welcome banner at the start of a chat session.
///
/// Shows the assistant's greeting and which backend endpoint the session
/// talks to, with a hint about slash commands.
pub fn print_welcome_banner(api_url: &str) {
    println!();
    println!("  {}", style(ASSISTANT_NAME).cyan().bold());
    println!();
    println!("  Hello! I'm your {ASSISTANT_NAME}.");
    println!("  Ask me anything about Physical AI & Humanoid Robotics!");
    println!();
    println!("  {}  {}", style("Backend:").bold(), style(api_url).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
