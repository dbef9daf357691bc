// Tue Jan 20 2026 - Alex

use clap::Parser;
use struct_layout::ui::cli::{Args, CommandHandler};

fn main() {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let handler = CommandHandler::new(!args.no_color);

    if let Err(error) = handler.execute(args) {
        handler.display().print(&*error);
        std::process::exit(1);
    }
}
