//! # doccy
//!
//! A parser for the doccy brace markup format.
//!
//! Doccy source is plain text with brace delimited elements:
//!
//!     {p: A paragraph with {em: emphasis} and a {a @href "http://x.test/": link}.}
//!
//! File Layout
//!
//! The work happens in two halves that share one tree:
//!
//! src/doccy
//!   ├── cursor        Windowed pattern search over the immutable source
//!   ├── token         The main loop's token classes (logos)
//!   ├── parsing       Main parse loop and the tag header grammar
//!   ├── tree          Arena document and tag classification
//!   ├── options       Prettification switches
//!   ├── prettify      Paragraph re-flow, typography and widow prevention
//!   ├── formats       XML, treeviz and snapshot (json/yaml) output, the fragment reader
//!   ├── transforms    Composable pipeline stages
//!   └── loader        Loading sources from files or strings
//!
//! For testing helpers, see the [testing module](doccy::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod doccy;
