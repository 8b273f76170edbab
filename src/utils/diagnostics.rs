//! System Diagnostics and Status Reporting
//!
//! Provides runtime diagnostics, status reporting, and system information
//! for debugging and monitoring.

use sysinfo::System;
use tracing::{info, warn};

/// System information for diagnostics
#[derive(Debug, Clone)]
pub struct SystemInfo {
    /// Operating system name (e.g., "Linux", "Ubuntu")
    pub os_name: String,
    /// Operating system version string
    pub os_version: String,

    /// Kernel version string
    pub kernel_version: String,

    /// Number of logical CPU cores
    pub cpu_count: usize,

    /// Total system memory in megabytes
    pub total_memory_mb: u64,

    /// System hostname
    pub hostname: String,
}

impl SystemInfo {
    /// Gather system information
    pub fn gather() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        Self {
            os_name: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version().unwrap_or_else(|| "Unknown".to_string()),
            cpu_count: sys.cpus().len(),
            total_memory_mb: sys.total_memory() / 1024 / 1024,
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }

    /// Log system information
    pub fn log(&self) {
        info!("=== System Information ===");
        info!("  OS: {} {}", self.os_name, self.os_version);
        info!("  Kernel: {}", self.kernel_version);
        info!("  Hostname: {}", self.hostname);
        info!("  CPUs: {}", self.cpu_count);
        info!("  Memory: {} MB", self.total_memory_mb);
    }
}

/// Detect the display server the session runs under
pub fn detect_display_server() -> Option<String> {
    if let Ok(display) = std::env::var("WAYLAND_DISPLAY") {
        return Some(format!("Wayland ({})", display));
    }

    if let Ok(display) = std::env::var("DISPLAY") {
        return Some(format!("X11 ({})", display));
    }

    None
}

/// Log complete diagnostics on startup
pub fn log_startup_diagnostics() {
    info!("╔════════════════════════════════════════════════════════════╗");
    info!("║          Startup Diagnostics                              ║");
    info!("╚════════════════════════════════════════════════════════════╝");

    // System info
    let sys_info = SystemInfo::gather();
    sys_info.log();

    // Environment
    info!("=== Environment ===");
    // Named `server` because a local called `display` collides with the
    // `use tracing::field::display` import inside tracing's macro expansion.
    if let Some(server) = detect_display_server() {
        info!("  Display server: {}", server);
    } else {
        warn!("  Display server: none detected (pointer injection will fail; try --dry-run)");
    }
    if let Ok(desktop) = std::env::var("XDG_CURRENT_DESKTOP") {
        info!("  Desktop: {}", desktop);
    }

    info!("=== Application ===");
    info!("  Version: {}", env!("CARGO_PKG_VERSION"));
    #[cfg(debug_assertions)]
    info!("  Build: debug");
    #[cfg(not(debug_assertions))]
    info!("  Build: release");

    info!("╚════════════════════════════════════════════════════════════╝");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_info_gather() {
        let info = SystemInfo::gather();
        assert!(!info.os_name.is_empty());
        assert!(info.cpu_count > 0);
        assert!(info.total_memory_mb > 0);
    }

    #[test]
    fn test_detect_display_server_does_not_panic() {
        // Result depends on the session; both outcomes are valid
        let _ = detect_display_server();
    }
}
