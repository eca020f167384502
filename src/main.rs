// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Intrasearch-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Intrasearch and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Intrasearch CLI entrypoint.
//!
//! By default this runs the interactive TUI against the search server. `--list` and `--query`
//! run headless and print to stdout.

use std::error::Error;

use intrasearch::api::ApiClient;
use intrasearch::backend::Backend;
use intrasearch::config::{CliOverrides, Config, Mode};
use intrasearch::logging::{self, LogTarget};
use intrasearch::query::QueryOutcome;
use intrasearch::render::text::result_lines;
use intrasearch::ui::ViewerState;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--url <base-url>] [--embedding <id>] [--log-file <path>]\n  {program} --demo [--embedding <id>] [--log-file <path>]\n  {program} [--url <base-url>] --list\n  {program} [--url <base-url>] --embedding <id> --query <text> [--limit <n>]\n\nThe base URL defaults to $INTRASEARCH_URL, then http://localhost:5000.\nLogs go to --log-file (or $INTRASEARCH_LOG_FILE); headless modes log to stderr otherwise.\n--demo serves a built-in document and result set instead of contacting a server."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    url: Option<String>,
    embedding: Option<String>,
    log_file: Option<String>,
    query: Option<String>,
    limit: Option<usize>,
    list: bool,
    demo: bool,
}

impl CliOptions {
    fn into_overrides(self) -> CliOverrides {
        CliOverrides {
            url: self.url,
            log_file: self.log_file,
            embedding: self.embedding,
            query: self.query,
            limit: self.limit,
            list: self.list,
            demo: self.demo,
        }
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    fn value(slot: &mut Option<String>, args: &mut impl Iterator<Item = String>) -> Result<(), ()> {
        if slot.is_some() {
            return Err(());
        }
        *slot = Some(args.next().ok_or(())?);
        Ok(())
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => value(&mut options.url, &mut args)?,
            "--embedding" => value(&mut options.embedding, &mut args)?,
            "--log-file" => value(&mut options.log_file, &mut args)?,
            "--query" => value(&mut options.query, &mut args)?,
            "--limit" => {
                if options.limit.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.limit = Some(raw.parse().map_err(|_| ())?);
            }
            "--list" => {
                if options.list {
                    return Err(());
                }
                options.list = true;
            }
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "intrasearch".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };
        let config = match Config::load(options.into_overrides()) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{program}: {err}");
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let log_target = match config.mode {
            Mode::Interactive => LogTarget::for_interactive(config.log_file.as_deref()),
            Mode::List | Mode::Query { .. } => LogTarget::for_headless(config.log_file.as_deref()),
        };
        logging::init(&log_target)?;

        let backend =
            if config.demo { Backend::Demo } else { Backend::Remote(ApiClient::new(&config.base_url)?) };
        tracing::info!(backend = %backend.label(), "starting");

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        match config.mode {
            Mode::List => {
                let documents = runtime.block_on(backend.list_embeddings())?;
                for document in documents {
                    println!("{}\t{}", document.id, document.label());
                }
            }
            Mode::Query { query, limit } => {
                let mut viewer = ViewerState::new();
                viewer.mount();
                viewer.select_document(config.embedding);
                let ticket = viewer.submit_query(&query)?;
                let result = runtime.block_on(backend.query(&ticket.embedding_id, &ticket.query));
                if let QueryOutcome::Applied { count } = viewer.complete_query(ticket, result)? {
                    tracing::info!(count, "query applied");
                }
                if let Some(limit) = limit {
                    viewer.stage_rowcount(limit);
                    viewer.commit_rowcount();
                }
                for line in result_lines(viewer.working_set()) {
                    println!("{line}");
                }
            }
            Mode::Interactive => {
                let handle = runtime.handle().clone();
                let embedding = config.embedding;
                runtime.block_on(async move {
                    let joined = tokio::task::spawn_blocking(move || {
                        intrasearch::tui::run(backend, embedding, handle)
                            .map_err(|err| err.to_string())
                    })
                    .await;
                    let tui_result = joined.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
                    tui_result.map_err(|err| {
                        Box::new(std::io::Error::new(std::io::ErrorKind::Other, err))
                            as Box<dyn Error>
                    })
                })?;
            }
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("intrasearch: {err}");
        std::process::exit(1);
    }
}
