// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelbrot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandelbrot::config::{Config, DEFAULT_OUTPUT};
use num::Complex;
use std::path::PathBuf;
use std::str::FromStr;

/// Given a string and a separator, returns the two values
/// separated by the separator.
fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const SPAN: &str = "span";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";

fn args<'a>(default_threads: &'a str) -> ArgMatches<'a> {
    App::new("mandelbrot")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT)
                .help("Output file (16-bit grayscale PNG)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1920x1080")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image, WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.1,-0.9")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Center of the view on the complex plane, RE,IM"),
        )
        .arg(
            Arg::with_name(SPAN)
                .required(false)
                .long(SPAN)
                .short("p")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0.1")
                .validator(|s| validate_number::<f64>(&s, "Could not parse span"))
                .help("Vertical half-span of the view"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(default_threads)
                .validator(|s| validate_number::<usize>(&s, "Could not parse thread count"))
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("200")
                .validator(|s| validate_number::<usize>(&s, "Could not parse iteration count"))
                .help("Maximum number of iterations per point"),
        )
        .get_matches()
}

// Every value has a default and has passed its validator, so parsing
// here only fails if a validator and its parser disagree.
fn config(matches: &ArgMatches) -> Option<Config> {
    let (width, height) = parse_pair(matches.value_of(SIZE)?, 'x')?;
    Some(Config {
        center: parse_complex(matches.value_of(CENTER)?)?,
        span: f64::from_str(matches.value_of(SPAN)?).ok()?,
        width,
        height,
        max_iterations: usize::from_str(matches.value_of(ITERATIONS)?).ok()?,
        threads: usize::from_str(matches.value_of(THREADS)?).ok()?,
        output: PathBuf::from(matches.value_of(OUTPUT)?),
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let default_threads = num_cpus::get().to_string();
    let matches = args(&default_threads);
    let config = match config(&matches) {
        Some(config) => config,
        None => {
            eprintln!("error: could not parse command line arguments");
            std::process::exit(1);
        }
    };
    debug!("{:?}", config);

    match mandelbrot::run(&config) {
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        Ok(()) => println!("Saved image to {}", config.output.display()),
    }
}
