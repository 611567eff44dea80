use std::{fs, path::Path};

use anyhow::{bail, Context};
use pngify::{
    chunks::ParseableChunk,
    progress::{self, Animation},
    resize, resized_path, DecodeOptions, IHDRChunk, PNG,
};

const USAGE: &str = "usage: pngify [-v] [--no-verify-crc] <command>

commands:
    resize <file> <width> <height>    write <file-stem>_<width>x<height>.png next to <file>
    convert <input> <output>          re-encode <input> as 8 bit RGBA
    inspect <file>                    print the chunk layout of <file> as JSON";

fn main() -> anyhow::Result<()> {
    let mut args: Vec<_> = std::env::args().skip(1).collect();
    let verbosity = if take_flag(&mut args, "-v") {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .parse_default_env()
        .init();
    let options = DecodeOptions {
        verify_checksums: !take_flag(&mut args, "--no-verify-crc"),
    };

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["resize", file, width, height] => {
            let width = width.parse().context("width must be a whole number")?;
            let height = height.parse().context("height must be a whole number")?;
            resize_file(Path::new(file), width, height, &options)
        }
        ["convert", input, output] => convert_file(Path::new(input), Path::new(output), &options),
        ["inspect", file] => inspect_file(Path::new(file), options.verify_checksums),
        _ => bail!(USAGE),
    }
}

fn take_flag(args: &mut Vec<String>, flag: &str) -> bool {
    let before = args.len();
    args.retain(|arg| arg != flag);
    args.len() != before
}

fn read_png(path: &Path, options: &DecodeOptions) -> anyhow::Result<PNG> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    PNG::decode_with(&bytes, options).with_context(|| format!("Failed to decode {}", path.display()))
}

fn resize_file(
    path: &Path,
    width: u32,
    height: u32,
    options: &DecodeOptions,
) -> anyhow::Result<()> {
    let output = resized_path(path, width, height);
    let message = format!("Resizing {}", path.display());
    progress::run(
        &message,
        Animation::Circle,
        progress::DEFAULT_INTERVAL,
        std::io::stderr(),
        || -> anyhow::Result<()> {
            let image = read_png(path, options)?;
            log::info!(
                "Resizing {}x{} to {width}x{height}",
                image.width(),
                image.height()
            );
            let resized = resize(image.pixels(), width, height)?;
            let file = fs::File::create(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            pngify::write_png(std::io::BufWriter::new(file), &resized)?;
            Ok(())
        },
    )?;
    println!("{}", output.display());
    Ok(())
}

fn convert_file(input: &Path, output: &Path, options: &DecodeOptions) -> anyhow::Result<()> {
    let message = format!("Converting {}", input.display());
    progress::run(
        &message,
        Animation::Dots,
        progress::DEFAULT_INTERVAL,
        std::io::stderr(),
        || -> anyhow::Result<()> {
            let image = read_png(input, options)?;
            log::info!(
                "Read {}x{} {:?} image",
                image.width(),
                image.height(),
                image.color_type()
            );
            fs::write(output, image.encode()?)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            Ok(())
        },
    )
}

fn inspect_file(path: &Path, verify_crc: bool) -> anyhow::Result<()> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let rest = pngify::parse_signature(&bytes)?;

    let mut header = None;
    let mut chunks = Vec::new();
    for chunk in pngify::iter_chunks(rest, verify_crc) {
        let chunk = chunk.with_context(|| format!("Failed to read chunk {}", chunks.len()))?;
        if header.is_none() && &chunk.chunk_type == IHDRChunk::HEADER {
            header = Some(IHDRChunk::from_data(chunk.data)?);
        }
        chunks.push(serde_json::json!({
            "type": chunk.chunk_type_str(),
            "length": chunk.data.len(),
            "crc": format!("{:08x}", chunk.crc),
            "critical": chunk.is_critical(),
        }));
    }
    let Some(header) = header else {
        bail!("{} has no IHDR chunk", path.display());
    };

    let now = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)?;
    let report = serde_json::json!({
        "file": path.display().to_string(),
        "date": now,
        "width": header.width,
        "height": header.height,
        "bit_depth": header.bit_depth(),
        "color_type": format!("{:?}", header.color_type()),
        "interlace_method": header.interlace_method(),
        "chunks": chunks,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
