use anyhow::Result;

use crate::Context;
use crate::action::{Action, SUPPORTED_ACTIONS};
use crate::ui;

/// List built-in actions with their playbook and required PHP extensions.
pub fn run(ctx: &Context) -> Result<()> {
    if !ctx.quiet {
        ui::header("Actions");
    }
    for name in SUPPORTED_ACTIONS {
        let action = Action::parse(name);
        let extensions = action.required_php_extensions();
        if extensions.is_empty() {
            ui::kv(name, &action.playbook());
        } else {
            ui::kv(
                name,
                &format!("{} (needs {})", action.playbook(), ui::join_human(&extensions)),
            );
        }
    }
    if !ctx.quiet {
        ui::dim("Any other name runs <name>.yml from the project directory.");
    }
    Ok(())
}
