//! One-shot mastery report: enumerate every purchase path in both dataset
//! forms and print the distinct cost tiers, cheapest first.
//!
//! With no argument the built-in mastery dataset is used. With a directory
//! argument, `mastery_tree.{ron,json,toml}` and `mastery_layers.{ron,json,toml}`
//! are discovered and loaded from it instead.
//!
//! Run with: `cargo run -p masteries-cli`

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use masteries_core::combine::enumerate_combinations;
use masteries_core::report::Report;
use masteries_core::walk::walk_paths;
use masteries_data::MasteryData;

fn main() -> ExitCode {
    let data = match std::env::args().nth(1) {
        Some(dir) => match masteries_data::load_mastery_data(Path::new(&dir)) {
            Ok(data) => data,
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => builtin_data(),
    };

    // Datasets are validated at load time; a walk failure here would be a
    // programming error.
    let paths = walk_paths(&data.tree, data.start).expect("dataset validated at load time");
    let tree_report = Report::new(paths);

    let layer_report = Report::new(enumerate_combinations(&data.layers));

    // One buffered write of the whole report.
    let mut out = tree_report.render();
    out.push_str(&layer_report.render_with_summary());
    io::stdout()
        .lock()
        .write_all(out.as_bytes())
        .expect("write report to stdout");

    ExitCode::SUCCESS
}

/// The compiled-in dataset. Both forms are hand-verified; a construction
/// failure is a programming error, so fail fast.
fn builtin_data() -> MasteryData {
    let (tree, start) =
        masteries_data::mastery_tree().expect("built-in tree is internally consistent");
    let layers =
        masteries_data::mastery_layers().expect("built-in layers are internally consistent");
    MasteryData {
        tree,
        start,
        layers,
    }
}
