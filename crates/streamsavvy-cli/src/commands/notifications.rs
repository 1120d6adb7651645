use crate::context::AppContext;
use crate::output::Output;
use crate::render;
use catalog_core::NotificationCenter;
use color_eyre::Result;
use serde_json::json;

pub fn run_notifications(ctx: &AppContext, keep_unread: bool, output: &Output) -> Result<()> {
    ctx.require_home()?;
    let mut center = NotificationCenter::load(ctx.store.clone());
    let unread = center.unread_count();

    if !output.is_human() {
        output.json(&json!({ "notifications": center.notifications(), "unread": unread }));
    } else if !output.is_quiet() {
        render::heading(&format!("Notifications ({} unread)", unread));
        render::print_notifications(center.notifications());
    }

    if !keep_unread {
        let marked = center.mark_all_read();
        tracing::debug!(marked, "Notifications marked read");
    }
    Ok(())
}
