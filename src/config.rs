// SPDX-FileCopyrightText: 2026 pbsquery developers
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Scheduler host discovery.

use std::env;
use std::fs;

/// Where Torque installations record the server host.
pub const SERVER_NAME_PATH: &str = "/var/spool/torque/server_name";

/// Resolve the default scheduler host.
///
/// Checks `PBS_DEFAULT`, then `PBS_SERVER`, then the first line of
/// `/var/spool/torque/server_name`, and falls back to `"localhost"`.
/// This mirrors the lookup order of the C library's `pbs_default()`.
pub fn default_server() -> String {
    for var in ["PBS_DEFAULT", "PBS_SERVER"] {
        if let Ok(value) = env::var(var) {
            let value = value.trim();
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }

    if let Ok(content) = fs::read_to_string(SERVER_NAME_PATH) {
        if let Some(line) = content.lines().find(|l| !l.trim().is_empty()) {
            return line.trim().to_string();
        }
    }

    "localhost".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_is_not_empty() {
        // Whatever the environment provides, the fallback chain always
        // produces a usable host name.
        assert!(!default_server().is_empty());
    }
}
