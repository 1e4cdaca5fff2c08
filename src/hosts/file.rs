// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory model of a host-resolution file.
//!
//! Lines the reconciler does not touch are kept verbatim, so a pass that only
//! evicts or appends kindling's own entries leaves the rest of the operator's
//! file byte-for-byte intact.

use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;

/// Address family of a [`HostEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntryType {
    Ipv4,
    Ipv6,
}

/// One resolver mapping: an address and the hostnames that resolve to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    pub address: IpAddr,
    pub names: BTreeSet<String>,
    pub comment: Option<String>,
}

impl HostEntry {
    #[must_use]
    pub fn new<I, S>(address: IpAddr, names: I, comment: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            address,
            names: names.into_iter().map(Into::into).collect(),
            comment,
        }
    }

    /// Address family, derived from the address.
    #[must_use]
    pub fn entry_type(&self) -> EntryType {
        match self.address {
            IpAddr::V4(_) => EntryType::Ipv4,
            IpAddr::V6(_) => EntryType::Ipv6,
        }
    }

    /// Whether the two entries share the address or any hostname.
    #[must_use]
    pub fn collides_with(&self, other: &HostEntry) -> bool {
        self.address == other.address || !self.names.is_disjoint(&other.names)
    }
}

impl fmt::Display for HostEntry {
    /// Standard `<address>\t<hostname...> # <comment>` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        write!(f, "{}\t{}", self.address, names.join(" "))?;
        if let Some(comment) = &self.comment {
            write!(f, " # {comment}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostsLine {
    /// A mapping; `raw` holds the text as read from disk
    Entry { entry: HostEntry, raw: Option<String> },
    /// Comments, blank lines and anything unparseable, kept verbatim
    Other(String),
}

impl HostsLine {
    fn parse(line: &str) -> Self {
        let (data, comment) = match line.split_once('#') {
            Some((data, comment)) => (data, Some(comment.trim())),
            None => (line, None),
        };

        let mut tokens = data.split_whitespace();
        let Some(address) = tokens.next().and_then(|t| t.parse::<IpAddr>().ok()) else {
            return Self::Other(line.to_string());
        };

        let names: Vec<&str> = tokens.collect();
        if names.is_empty() {
            return Self::Other(line.to_string());
        }

        let comment = comment.filter(|c| !c.is_empty()).map(str::to_string);
        Self::Entry {
            entry: HostEntry::new(address, names, comment),
            raw: Some(line.to_string()),
        }
    }

    fn entry(&self) -> Option<&HostEntry> {
        match self {
            Self::Entry { entry, .. } => Some(entry),
            Self::Other(_) => None,
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Entry { raw: Some(raw), .. } | Self::Other(raw) => raw.clone(),
            Self::Entry { entry, raw: None } => entry.to_string(),
        }
    }
}

/// Ordered contents of a hosts file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostsFile {
    lines: Vec<HostsLine>,
}

impl HostsFile {
    /// Parse file content. Never fails: unrecognized lines are kept as-is.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.lines().map(HostsLine::parse).collect(),
        }
    }

    /// All mappings, in file order.
    pub fn entries(&self) -> impl Iterator<Item = &HostEntry> {
        self.lines.iter().filter_map(HostsLine::entry)
    }

    /// Remove every entry colliding with `entry`; returns how many were removed.
    pub fn remove_colliding(&mut self, entry: &HostEntry) -> usize {
        let before = self.lines.len();
        self.lines
            .retain(|line| line.entry().is_none_or(|existing| !existing.collides_with(entry)));
        before - self.lines.len()
    }

    /// Make the file hold `desired` on top of every non-colliding entry.
    ///
    /// Within `desired`, entries sharing an address are merged onto one line
    /// (the first entry's comment is kept), and a hostname claimed at two
    /// addresses goes to the last one. The surviving entries are appended in
    /// address-then-names order.
    pub fn reconcile(&mut self, desired: &[HostEntry]) {
        let mut survivors: Vec<HostEntry> = Vec::with_capacity(desired.len());
        for entry in desired {
            survivors.retain(|kept| {
                kept.address == entry.address || kept.names.is_disjoint(&entry.names)
            });
            match survivors.iter_mut().find(|kept| kept.address == entry.address) {
                Some(kept) => kept.names.extend(entry.names.iter().cloned()),
                None => survivors.push(entry.clone()),
            }
        }
        survivors.sort_by(|a, b| (a.address, &a.names).cmp(&(b.address, &b.names)));

        for entry in &survivors {
            self.remove_colliding(entry);
        }

        self.lines
            .extend(survivors.into_iter().map(|entry| HostsLine::Entry { entry, raw: None }));
    }

    /// Render the full file, one line per entry, newline-terminated.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.render() + "\n")
            .collect()
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod file_tests;
