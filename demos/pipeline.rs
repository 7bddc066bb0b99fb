//! Standalone demo: parse a color, run a few steps, print every format.
//!
//! `cargo run --example pipeline -- "hsl(210, 60%, 50%)"`

use pickolor::{ColorEngine, ColorFormat, FormatRequest, Transformation};

fn main() {
    let input = std::env::args().nth(1).unwrap_or_else(|| "#ff8800".to_string());
    let engine = ColorEngine::new();

    let model = match engine.parse(&input) {
        Ok(model) => model,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    println!("{input} → {model:?}");

    let steps = [
        Transformation::lighten(0.1),
        Transformation::hue_shift(30.0),
        Transformation::alpha(-0.2),
    ];
    let shifted = match engine.transform(&model, &steps) {
        Ok(shifted) => shifted,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    for target in ColorFormat::ALL {
        match engine.format(&shifted, &FormatRequest::to(target).precision(3)) {
            Ok(text) => println!("{target:>6}: {text}"),
            Err(err) => println!("{target:>6}: {err}"),
        }
    }
}
