use std::env;

use tokio::process::Command;
use tuicher_types::Session;

/// Program and arguments for a session action, `None` when the desktop is unknown
pub fn session_command(session: Session, desktop: Option<&str>) -> Option<(&'static str, Vec<&'static str>)> {
    match session {
        Session::Shutdown => Some(("systemctl", vec!["poweroff"])),
        Session::Restart => Some(("systemctl", vec!["reboot"])),
        Session::Suspend => Some(("systemctl", vec!["suspend"])),
        Session::Logout => match desktop?.to_lowercase().as_str() {
            "hyprland" => Some(("hyprctl", vec!["dispatch", "exit"])),
            "kde" => Some((
                "qdbus6",
                vec!["org.kde.Shutdown", "/Shutdown", "org.kde.Shutdown.logout"],
            )),
            _ => None,
        },
    }
}

pub fn run_session_action(session: Session) -> Result<(), anyhow::Error> {
    let desktop = env::var("XDG_CURRENT_DESKTOP").ok();
    let Some((program, args)) = session_command(session, desktop.as_deref()) else {
        anyhow::bail!(
            "No logout command for desktop '{}'",
            desktop.unwrap_or_default()
        );
    };

    tracing::info!("Running {} {}", program, args.join(" "));
    Command::new(program).args(args).spawn()?;

    Ok(())
}
