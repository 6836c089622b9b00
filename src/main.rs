use sysml_v2::cli;
use sysml_v2::ui::output;

fn main() {
    match cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            output::error(format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
