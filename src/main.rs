use xtask::{logging::init_logger, parse_args, pipeline, ErrorKind, Result};

fn main() -> Result<()> {
    let args = parse_args();
    init_logger(args.verbose)?;

    match pipeline(args) {
        Ok(_) => (),
        Err(err) => {
            match err.kind() {
                ErrorKind::Interrupted => println!("\n[ABORTED] User interrupted"),
                _ if err.already_reported() => (),
                _ => println!("[ERROR] {err}"),
            }
            std::process::exit(1);
        }
    };
    Ok(())
}
