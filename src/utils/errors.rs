//! User-Friendly Error Formatting
//!
//! Provides user-friendly error messages with troubleshooting hints
//! for common error scenarios.

use std::fmt::Write;

/// Format error for user consumption
///
/// Takes technical error and produces user-friendly message with
/// troubleshooting steps and context.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    // Header
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        &mut output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(&mut output).ok();

    // Analyze error and provide context
    let error_msg = error.to_string();
    let lowered = error_msg.to_lowercase();

    if lowered.contains("sensor") || lowered.contains("capture") || lowered.contains("replay") {
        format_sensor_error(&mut output, &error_msg);
    } else if lowered.contains("pointer") || lowered.contains("display") {
        format_pointer_error(&mut output, &error_msg);
    } else if lowered.contains("config") {
        format_config_error(&mut output, &error_msg);
    } else {
        format_generic_error(&mut output, &error_msg);
    }

    // Technical details
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Technical Details:").ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "{:#}", error).ok();
    writeln!(&mut output).ok();

    // Footer with help
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Need Help?").ok();
    writeln!(
        &mut output,
        "  - Run with --verbose for detailed logs: handmouse -vvv"
    )
    .ok();
    writeln!(
        &mut output,
        "  - Check config: ~/.config/handmouse/config.toml"
    )
    .ok();
    writeln!(
        &mut output,
        "  - Try a recorded capture without touching the mouse:"
    )
    .ok();
    writeln!(
        &mut output,
        "      handmouse --source replay:captures/sample-wave.jsonl --dry-run"
    )
    .ok();

    output
}

fn format_sensor_error(output: &mut String, _error: &str) {
    writeln!(output, "Sensor Acquisition Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not open a body-tracking frame source.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. No sensor source configured").ok();
    writeln!(
        output,
        "     → Pass one: handmouse --source replay:capture.jsonl"
    )
    .ok();
    writeln!(
        output,
        "     → Or set it in config.toml: [sensor] source = \"stdin\""
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  2. Capture file not found").ok();
    writeln!(output, "     → Check the path after 'replay:'").ok();
    writeln!(
        output,
        "     → A sample ships in the repo: captures/sample-wave.jsonl"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  3. Capture is missing its header line").ok();
    writeln!(
        output,
        "     → The first line must describe the sensor, e.g."
    )
    .ok();
    writeln!(
        output,
        "       {{\"depth_width\":512,\"depth_height\":424,\"body_capacity\":6}}"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  4. TCP feed is not listening").ok();
    writeln!(output, "     → Check the feeder side is up before starting").ok();
    writeln!(output, "     → Verify: nc <host> <port> prints frame lines").ok();
}

fn format_pointer_error(output: &mut String, _error: &str) {
    writeln!(output, "Pointer Injection Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not drive the OS mouse pointer.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. No graphical session").ok();
    writeln!(
        output,
        "     → Check: echo $DISPLAY or echo $WAYLAND_DISPLAY"
    )
    .ok();
    writeln!(
        output,
        "     → On a headless box, use --dry-run to log actions instead"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  2. Wayland compositor refused injection").ok();
    writeln!(output, "     → Grant the permission dialog when it appears").ok();
    writeln!(
        output,
        "     → Some compositors need xdg-desktop-portal running"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  3. Built without the injection backend").ok();
    writeln!(
        output,
        "     → Rebuild with default features (enigo-backend)"
    )
    .ok();
    writeln!(output, "     → Or run with: --dry-run").ok();
}

fn format_config_error(output: &mut String, _error: &str) {
    writeln!(output, "Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "Problem with configuration file.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Configuration file not found").ok();
    writeln!(
        output,
        "     → Default location: ~/.config/handmouse/config.toml"
    )
    .ok();
    writeln!(
        output,
        "     → Or specify: handmouse -c /path/to/config.toml"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  2. Invalid TOML syntax").ok();
    writeln!(output, "     → Check for typos, missing quotes, etc.").ok();
    writeln!(output).ok();
    writeln!(output, "  3. Invalid values").ok();
    writeln!(output, "     → backend must be \"enigo\" or \"null\"").ok();
    writeln!(
        output,
        "     → source must be replay:<path>, stdin, or tcp:<addr>"
    )
    .ok();
    writeln!(
        output,
        "     → screen_width and screen_height go together"
    )
    .ok();
}

fn format_generic_error(output: &mut String, error: &str) {
    writeln!(output, "Runtime Error").ok();
    writeln!(output).ok();
    writeln!(output, "An error occurred while tracking the hand.").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
    writeln!(output).ok();
    writeln!(output, "Troubleshooting:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Reproduce against a recorded capture:").ok();
    writeln!(
        output,
        "     → handmouse --source replay:captures/sample-wave.jsonl --dry-run -vvv"
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "  2. Verify the graphical session:").ok();
    writeln!(output, "     → echo $WAYLAND_DISPLAY or echo $DISPLAY").ok();
    writeln!(output).ok();
    writeln!(output, "  3. Check the feed format:").ok();
    writeln!(
        output,
        "     → One JSON header line, then one JSON frame per line"
    )
    .ok();
}
