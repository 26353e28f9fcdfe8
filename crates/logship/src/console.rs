// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;

/// Local echo collaborator: three single-line output streams. Writes are
/// fire-and-forget; failures are unobservable to the rest of the system.
pub trait ConsoleSink: Send + Sync {
    fn info(&self, line: &str);
    fn warn(&self, line: &str);
    fn error(&self, line: &str);
}

/// Default sink: informational lines to stdout, warnings and errors to
/// stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardStreams;

impl ConsoleSink for StandardStreams {
    fn info(&self, line: &str) {
        let _ = writeln!(std::io::stdout(), "{line}");
    }

    fn warn(&self, line: &str) {
        let _ = writeln!(std::io::stderr(), "{line}");
    }

    fn error(&self, line: &str) {
        let _ = writeln!(std::io::stderr(), "{line}");
    }
}
