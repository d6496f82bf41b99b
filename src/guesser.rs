use crate::traits::ImageSink;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Extensions tried for each filename candidate, in preference order.
pub const FILE_EXTENSIONS: [&str; 5] = [".jpg", ".png", ".webp", ".jpeg", ".gif"];

fn digit_runs() -> Regex {
    Regex::new(r"\d+").unwrap()
}

/// The original core plus up to three variants with the *last* digit run
/// incremented, keeping its zero-padded width (`"01_02"` -> `"01_03"`,
/// `"01_04"`, `"01_05"`). A core without digits yields only itself.
pub fn filename_variations(core: &str) -> Vec<String> {
    let mut variations = vec![core.to_string()];

    if let Some(last) = digit_runs().find_iter(core).last() {
        if let Ok(value) = last.as_str().parse::<u64>() {
            let width = last.as_str().len();
            for step in 1..=3u64 {
                let rendered = format!("{:0width$}", value + step, width = width);
                variations.push(format!(
                    "{}{}{}",
                    &core[..last.start()],
                    rendered,
                    &core[last.end()..]
                ));
            }
        }
    }

    variations
}

/// Increment the *first* digit run of the core to jump to the next logical
/// group (`"01_02"` -> `"02_02"`). A core without digits gets `"_01"`
/// appended to force a distinct seed.
pub fn increment_primary_core(core: &str) -> String {
    if let Some(first) = digit_runs().find(core) {
        if let Ok(value) = first.as_str().parse::<u64>() {
            let width = first.as_str().len();
            let rendered = format!("{:0width$}", value + 1, width = width);
            return format!("{}{}{}", &core[..first.start()], rendered, &core[first.end()..]);
        }
    }
    format!("{}_01", core)
}

/// Extension try order: the last extension that worked goes first, the rest
/// of the fixed set follows in its usual order.
pub fn extension_order(preferred: Option<&'static str>) -> Vec<&'static str> {
    match preferred {
        Some(p) => {
            let mut order = vec![p];
            order.extend(FILE_EXTENSIONS.iter().copied().filter(|ext| *ext != p));
            order
        }
        None => FILE_EXTENSIONS.to_vec(),
    }
}

/// Mutable state of one album's guessing loop.
#[derive(Debug)]
pub struct GuessState {
    pub core: String,
    pub tried: HashSet<String>,
    pub preferred_ext: Option<&'static str>,
    pub downloaded: usize,
    pub consecutive_stalls: u32,
}

impl GuessState {
    pub fn new(seed_core: &str) -> Self {
        Self {
            core: seed_core.to_string(),
            tried: HashSet::new(),
            preferred_ext: None,
            downloaded: 0,
            consecutive_stalls: 0,
        }
    }
}

/// Drives the candidate loop: derives filename candidates from the current
/// core, delegates each to the [`ImageSink`], and advances the core either
/// to the last hit or past a stalled group.
pub struct FilenameGuesser<'a> {
    base_url: String,
    album_dir: PathBuf,
    sink: &'a dyn ImageSink,
}

impl<'a> FilenameGuesser<'a> {
    pub fn new(base_url: impl Into<String>, album_dir: PathBuf, sink: &'a dyn ImageSink) -> Self {
        Self {
            base_url: base_url.into(),
            album_dir,
            sink,
        }
    }

    /// One outer iteration: try every untried candidate derived from the
    /// current core, each with the full extension order. Returns true if an
    /// image was downloaded; on a stall the core is bumped past the group.
    pub async fn step(&self, state: &mut GuessState) -> bool {
        for candidate in filename_variations(&state.core) {
            if state.tried.contains(&candidate) {
                continue;
            }

            let mut downloaded = false;
            for ext in extension_order(state.preferred_ext) {
                let image_url = format!("{}/{}{}", self.base_url, candidate, ext);
                let save_path = self.album_dir.join(format!("{}{}", candidate, ext));

                if self.sink.fetch_and_save(&image_url, &save_path).await {
                    state.downloaded += 1;
                    state.core = candidate.clone();
                    state.preferred_ext = Some(ext);
                    downloaded = true;
                    break;
                }
            }

            state.tried.insert(candidate);

            if downloaded {
                state.consecutive_stalls = 0;
                return true;
            }
        }

        error!(
            "[GUESSER] Failed to download any image for variations starting with '{}'",
            state.core
        );
        state.consecutive_stalls += 1;
        state.core = increment_primary_core(&state.core);
        false
    }

    /// Run the loop until `expected` images are on disk or `stall_budget`
    /// consecutive iterations produced nothing.
    pub async fn run(&self, seed_core: &str, expected: usize, stall_budget: u32) -> usize {
        let mut state = GuessState::new(seed_core);

        let pb = ProgressBar::new(expected as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );

        while state.downloaded < expected {
            pb.set_message(format!("guessing from {}", state.core));
            if self.step(&mut state).await {
                pb.inc(1);
                continue;
            }
            if state.consecutive_stalls >= stall_budget {
                warn!(
                    "[GUESSER] Aborting album after {} consecutive failed rounds",
                    state.consecutive_stalls
                );
                break;
            }
        }

        pb.finish_and_clear();
        info!("[GUESSER] Downloaded {}/{} images", state.downloaded, expected);
        state.downloaded
    }
}
