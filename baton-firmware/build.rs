//! Build script for baton-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates baton.toml at compile time
//! - Generates `config.rs` with the validated settings as constants

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Limits shared with `baton_core::config`
const MAX_CONTRAST: i64 = 0x7F;
const MAX_TEMP_COEFFICIENT: i64 = 3;
const MAX_BIAS: i64 = 7;
const MAX_BUS_FREQUENCY_HZ: i64 = 4_000_000;
const MIN_STEP_MS: i64 = 10;
const MAX_BANNER_LEN: usize = 12;

/// Settings extracted from baton.toml
struct Settings {
    contrast: i64,
    temp_coefficient: i64,
    bias: i64,
    frequency_hz: i64,
    mode: i64,
    step_ms: i64,
    banner: String,
}

impl Settings {
    const DEFAULT: Self = Self {
        contrast: 0x3F,
        temp_coefficient: 0,
        bias: 4,
        frequency_hz: 2_000_000,
        mode: 0,
        step_ms: 1000,
        banner: String::new(),
    };
}

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    setup_linker(&out_dir);
    let settings = validate_config();
    generate_config(&out_dir, &settings);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate baton.toml configuration at compile time
fn validate_config() -> Settings {
    // Re-run if baton.toml changes
    println!("cargo:rerun-if-changed=baton.toml");

    let config_path = Path::new("baton.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: baton.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a baton.toml configuration file.          ║\n\
            ║  Please create one in the baton-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read baton.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in baton.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut settings = Settings::DEFAULT;
    settings.banner = String::from("Welcome");

    validate_display(&config, &mut settings);
    validate_bus(&config, &mut settings);
    validate_animation(&config, &mut settings);

    println!("cargo:warning=baton.toml validated successfully");
    settings
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with every collected error for one section
fn fail_section(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Look up an optional section, which must be a table if present
fn section<'a>(
    config: &'a toml::Value,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<&'a toml::value::Table> {
    match config.get(name) {
        Some(toml::Value::Table(t)) => Some(t),
        Some(_) => {
            errors.push(format!("[{}] must be a table", name));
            None
        }
        None => None,
    }
}

/// Read an optional integer key and range check it
fn integer(
    table: &toml::value::Table,
    section: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    slot: &mut i64,
    errors: &mut Vec<String>,
) {
    match table.get(key) {
        Some(toml::Value::Integer(v)) if range.contains(v) => *slot = *v,
        Some(toml::Value::Integer(_)) => errors.push(format!(
            "[{}] {} must be {}-{}",
            section,
            key,
            range.start(),
            range.end()
        )),
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
        None => {}
    }
}

/// Validate the [display] section
fn validate_display(config: &toml::Value, settings: &mut Settings) {
    let mut errors = Vec::new();

    if let Some(display) = section(config, "display", &mut errors) {
        integer(
            display,
            "display",
            "contrast",
            0..=MAX_CONTRAST,
            &mut settings.contrast,
            &mut errors,
        );
        integer(
            display,
            "display",
            "temperature_coefficient",
            0..=MAX_TEMP_COEFFICIENT,
            &mut settings.temp_coefficient,
            &mut errors,
        );
        integer(
            display,
            "display",
            "bias",
            0..=MAX_BIAS,
            &mut settings.bias,
            &mut errors,
        );
    }

    if !errors.is_empty() {
        fail_section("Invalid display configuration", &errors);
    }
}

/// Validate the [bus] section
fn validate_bus(config: &toml::Value, settings: &mut Settings) {
    let mut errors = Vec::new();

    if let Some(bus) = section(config, "bus", &mut errors) {
        integer(
            bus,
            "bus",
            "frequency_hz",
            1..=MAX_BUS_FREQUENCY_HZ,
            &mut settings.frequency_hz,
            &mut errors,
        );
        integer(bus, "bus", "mode", 0..=3, &mut settings.mode, &mut errors);

        // The controller samples on the rising edge with the clock idle low
        if settings.mode != 0 {
            errors.push(String::from("[bus] mode must be 0 for the PCD8544"));
        }
    }

    if !errors.is_empty() {
        fail_section("Invalid bus configuration", &errors);
    }
}

/// Validate the [animation] section
fn validate_animation(config: &toml::Value, settings: &mut Settings) {
    let mut errors = Vec::new();

    if let Some(animation) = section(config, "animation", &mut errors) {
        integer(
            animation,
            "animation",
            "step_ms",
            MIN_STEP_MS..=i64::from(u32::MAX),
            &mut settings.step_ms,
            &mut errors,
        );

        match animation.get("banner") {
            Some(toml::Value::String(banner)) => {
                if banner.len() > MAX_BANNER_LEN {
                    errors.push(format!(
                        "[animation] banner must be at most {} characters",
                        MAX_BANNER_LEN
                    ));
                }
                if !banner.bytes().all(|b| (0x20..=0x7F).contains(&b)) {
                    errors.push(String::from(
                        "[animation] banner must be printable ASCII",
                    ));
                }
                settings.banner = banner.clone();
            }
            Some(_) => errors.push(String::from("[animation] banner must be a string")),
            None => {}
        }
    }

    if !errors.is_empty() {
        fail_section("Invalid animation configuration", &errors);
    }
}

/// Write the validated settings as Rust constants
fn generate_config(out_dir: &Path, settings: &Settings) {
    let source = format!(
        "// Generated from baton.toml by build.rs\n\
        \n\
        /// Controller settings\n\
        pub const DISPLAY: DisplayConfig = DisplayConfig {{\n    \
            contrast: {},\n    \
            temp_coefficient: {},\n    \
            bias: {},\n\
        }};\n\
        \n\
        /// Serial bus settings\n\
        pub const BUS: BusConfig = BusConfig {{\n    \
            frequency_hz: {},\n    \
            mode: Mode::Mode{},\n\
        }};\n\
        \n\
        /// Animation cadence\n\
        pub const ANIMATION: AnimationConfig = AnimationConfig {{ step_ms: {} }};\n\
        \n\
        /// Boot banner\n\
        pub const BANNER: &str = {:?};\n",
        settings.contrast,
        settings.temp_coefficient,
        settings.bias,
        settings.frequency_hz,
        settings.mode,
        settings.step_ms,
        settings.banner,
    );

    let mut f = File::create(out_dir.join("config.rs")).unwrap();
    f.write_all(source.as_bytes()).unwrap();
}
