use clap::{arg,crate_version,Command};
use huffpack::static_huff;

const RCH: &str = "unreachable was reached";

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::init();
    let long_help =
"Examples:
---------
Compress:      `huffpack compress -i my_file -o my_file.huf`
Expand:        `huffpack expand -i my_file.huf -o my_file`";

    let mut main_cmd = Command::new("huffpack")
        .about("Compress and expand with static Huffman coding")
        .after_long_help(long_help)
        .version(crate_version!());
    main_cmd = main_cmd.subcommand(Command::new("compress")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("compress a file"));

    main_cmd = main_cmd.subcommand(Command::new("expand")
        .arg(arg!(-i --input <PATH> "input path").required(true))
        .arg(arg!(-o --output <PATH> "output path").required(true))
        .about("expand a file"));

    let matches = main_cmd.get_matches();

    if let Some(cmd) = matches.subcommand_matches("compress") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let dat = std::fs::read(path_in)?;
        let compressed = static_huff::compress(&dat)?;
        log::info!("compressed {} into {}, ratio {:.3}",
            dat.len(),compressed.len(),compressed.len() as f64 / dat.len() as f64);
        std::fs::write(path_out,compressed)?;
    }

    if let Some(cmd) = matches.subcommand_matches("expand") {
        let path_in = cmd.get_one::<String>("input").expect(RCH);
        let path_out = cmd.get_one::<String>("output").expect(RCH);
        let dat = std::fs::read(path_in)?;
        let expanded = static_huff::expand(&dat)?;
        log::info!("expanded {} into {}",dat.len(),expanded.len());
        std::fs::write(path_out,expanded)?;
    }

    Ok(())
}
