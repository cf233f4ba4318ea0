//! Error hints: mapping from error variants to user-facing remediation suggestions.
//!
//! Each error variant maps to:
//! - A 1-line summary (human readable)
//! - 0-2 actionable hints (commands, env vars, paths)
//!
//! Paths, lines, status codes and raw answers are already part of each
//! variant's message, so only the summary and hints are added around it.

use crate::error::Error;
use std::fmt::Write as _;

/// A remediation hint for an error.
#[derive(Debug, Clone)]
pub struct ErrorHint {
    /// Brief 1-line summary of the error category.
    pub summary: &'static str,
    /// Actionable hints for the user (0-2 items).
    pub hints: &'static [&'static str],
}

/// Get remediation hints for an error variant.
pub fn hints_for_error(error: &Error) -> ErrorHint {
    match error {
        Error::Config(msg) => config_hints(msg),
        Error::Load { message, .. } => load_hints(message),
        Error::Transport(msg) => transport_hints(msg),
        Error::Status { status, .. } => status_hints(*status),
        Error::Decode(_) | Error::EmptyChoices => ErrorHint {
            summary: "Oracle response had an unexpected shape",
            hints: &["Check that the endpoint speaks the expected JSON protocol"],
        },
        Error::ServiceFailure(_) => ErrorHint {
            summary: "Classification service could not match the intent",
            hints: &[],
        },
        Error::NoDigits { .. } | Error::InvalidInteger { .. } | Error::OutOfRange { .. } => {
            ErrorHint {
                summary: "Model answer was not a catalog service id",
                hints: &["Run 'intent-bench catalog --prompt' to review the instruction"],
            }
        }
        Error::Io(err) => io_hints(err),
        Error::Json(_) => ErrorHint {
            summary: "JSON serialization error",
            hints: &[],
        },
        Error::Csv(_) => ErrorHint {
            summary: "CSV read or write failed",
            hints: &["Sample files use ';' as delimiter: service_id;service_name;intent"],
        },
    }
}

fn config_hints(msg: &str) -> ErrorHint {
    if msg.contains("API key") {
        return ErrorHint {
            summary: "API key not configured",
            hints: &[
                "Set OPENROUTER_API_KEY environment variable",
                "Or pass --api-key on the command line",
            ],
        };
    }
    if msg.contains("Settings file") || msg.contains("settings file") {
        return ErrorHint {
            summary: "Invalid or missing settings file",
            hints: &[
                "Check that the file passed via --config or INTENT_BENCH_CONFIG is valid JSON",
                "Remove the flag to fall back to ./intent-bench.json or built-in defaults",
            ],
        };
    }
    ErrorHint {
        summary: "Invalid configuration",
        hints: &["Run 'intent-bench --help' to review flag values"],
    }
}

fn load_hints(message: &str) -> ErrorHint {
    if message.contains("cannot open") {
        return ErrorHint {
            summary: "Sample file not found or unreadable",
            hints: &["Pass the sample file explicitly with --input"],
        };
    }
    ErrorHint {
        summary: "Sample file rejected",
        hints: &[
            "Each line must be service_id;service_name;intent",
            "Run 'intent-bench catalog' to list valid service ids",
        ],
    }
}

fn transport_hints(msg: &str) -> ErrorHint {
    if msg.contains("timed out") {
        return ErrorHint {
            summary: "Request timed out",
            hints: &["Raise the timeout with --timeout-secs or --timeout-ms"],
        };
    }
    ErrorHint {
        summary: "Could not reach the oracle",
        hints: &[
            "Check that the endpoint URL is correct and the service is running",
            "If using a proxy, verify proxy settings",
        ],
    }
}

fn status_hints(status: u16) -> ErrorHint {
    match status {
        401 | 403 => ErrorHint {
            summary: "API key is invalid or expired",
            hints: &["Verify OPENROUTER_API_KEY is correct and active"],
        },
        429 => ErrorHint {
            summary: "Rate limit exceeded",
            hints: &["Wait a moment and try again", "Reduce --calls or --max"],
        },
        500..=599 => ErrorHint {
            summary: "Oracle server error",
            hints: &["This is usually temporary; try again shortly"],
        },
        _ => ErrorHint {
            summary: "Oracle rejected the request",
            hints: &["Check the model id and endpoint URL"],
        },
    }
}

fn io_hints(err: &std::io::Error) -> ErrorHint {
    match err.kind() {
        std::io::ErrorKind::NotFound => ErrorHint {
            summary: "File or directory not found",
            hints: &["Verify the path exists and is spelled correctly"],
        },
        std::io::ErrorKind::PermissionDenied => ErrorHint {
            summary: "Permission denied",
            hints: &["Check write permissions on the output directory"],
        },
        _ => ErrorHint {
            summary: "I/O error",
            hints: &[],
        },
    }
}

/// Format an error with its hints for terminal output.
pub fn format_error_with_hints(error: &Error) -> String {
    let hint = hints_for_error(error);
    let mut output = String::new();

    let _ = writeln!(&mut output, "Error: {error}");

    // Summary if different from error message
    if !error.to_string().contains(hint.summary) {
        output.push('\n');
        output.push_str(hint.summary);
        output.push('\n');
    }

    if !hint.hints.is_empty() {
        output.push_str("\nSuggestions:\n");
        for &h in hint.hints {
            let _ = writeln!(&mut output, "  \u{2022} {h}");
        }
    }

    output
}
