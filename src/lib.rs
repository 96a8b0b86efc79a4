//! itg-cli library
//!
//! Ingests ITGmania/StepMania packs and songs from folders, archives, and links
//! into a library on disk, and moves songs in and out of a censored folder.
//!
//! Pipeline, leaf first:
//! - [`source`]: stage the input in a private [`temp::WorkingDir`]
//! - [`locator`]: find chart files and infer the pack or song root
//! - [`conflict`]: ask the caller's policy before replacing an existing entity
//! - [`library`]: commit into the library, migrating courses and clearing cache entries
//! - [`operations`]: the full add-pack, add-song, and censor pipelines
//!
//! Supporting modules: [`config`], [`error`], [`simfile`], [`fs_ops`],
//! [`path_utils`], [`progress`], [`ui`].

pub mod config;
pub mod conflict;
pub mod error;
pub mod fs_ops;
pub mod library;
pub mod locator;
pub mod operations;
pub mod path_utils;
pub mod progress;
pub mod simfile;
pub mod source;
pub mod temp;
pub mod ui;
