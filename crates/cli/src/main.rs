use ets_tracker::{prelude::*, session};
use std::{
    io::{self, BufRead, Write},
    path::Path,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

fn print_menu() {
    println!("\nEdmonton Transit System");
    println!("{}", "-".repeat(20));
    println!("(1) Load route data");
    println!("(2) Load shapes data");
    println!("(3) Load disruptions data\n");
    println!("(4) Print shape IDs for a route");
    println!("(5) Print coordinates for a shape ID");
    println!("(6) Find longest shape for route\n");
    println!("(7) Save routes, shapes and disruptions");
    println!("(8) Load routes, shapes and disruptions");
    println!("(9) Interactive map");
    println!("(0) Quit");
}

/// Prints `prompt` and reads one trimmed line. `None` on end of input.
fn ask(input: &mut impl BufRead, prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn print_reply(reply: &Reply) {
    match reply {
        Reply::Loaded { source, .. } => println!("Data from {source} loaded"),
        Reply::ShapeIds {
            route_id,
            stop_names,
            shape_ids,
        } => {
            let locations = stop_names
                .iter()
                .map(|name| &**name)
                .collect::<Vec<_>>()
                .join(" - ");
            println!("Shape ids for route {route_id} at location {locations}:");
            for shape_id in shape_ids {
                println!("\t{shape_id}");
            }
        }
        Reply::Coordinates {
            shape_id,
            coordinates,
            length,
        } => {
            println!("Shape ID coordinates {shape_id} are ({length} long):");
            for coordinate in coordinates {
                println!("\t{coordinate}");
            }
        }
        Reply::LongestShape { route_id, shape } => println!(
            "The longest shape for {route_id} is {} with {} coordinates",
            shape.shape_id, shape.coordinate_count
        ),
        Reply::Saved(path) => {
            println!("Data structures successfully written to {}", path.display())
        }
        Reply::Restored(path) => println!(
            "Routes, shapes and disruptions successfully loaded from {}",
            path.display()
        ),
        Reply::NotFound => println!("\t** NOT FOUND **"),
        Reply::ViewReady | Reply::Quit => {}
    }
}

fn print_marker(coordinate: &Coordinate) {
    println!("\tdisrupted at {coordinate}");
}

/// Text stand-in for the map window: origin and destination are read from
/// the terminal and each pair runs one search.
fn run_map(session: &Session, input: &mut impl BufRead) -> io::Result<()> {
    let today = chrono::Local::now().date_naive();
    let mut view = match session.map_view(today) {
        Ok(view) => view,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };

    let buttons = Button::ALL.map(|button| button.label()).join(" | ");
    println!("[ {buttons} ]");
    let markers = view.disruption_markers();
    println!("{} active disruptions on {today}", markers.len());
    markers.iter().for_each(print_marker);

    loop {
        let Some(origin) = ask(input, "From (blank line to leave the map): ")? else {
            return Ok(());
        };
        if origin.is_empty() {
            return Ok(());
        }
        let Some(destination) = ask(input, "To: ")? else {
            return Ok(());
        };
        view.set_origin(origin);
        view.set_destination(destination);
        match view.handle(ViewEvent::Key("Return".into())) {
            ViewAction::DrawRoute {
                route_id,
                shape_id,
                segments,
            } => {
                println!("Route {route_id} using shape {shape_id}:");
                for segment in segments {
                    println!("\t{} -> {}", segment.from, segment.to);
                }
            }
            _ => println!("\t** NOT FOUND **"),
        }
        view.handle(ViewEvent::Click {
            x: Button::ClearText.region().min_x,
            y: Button::ClearText.region().min_y,
        });
    }
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let args: Vec<_> = std::env::args().collect();
    let mut session = match args.get(1).map(Path::new) {
        Some(path) if path.extension().is_some_and(|ext| ext == "zip") => {
            info!("Reading datasets from {}", path.display());
            Session::default().with_reader(DatasetReader::default().from_zip(path))
        }
        Some(path) => {
            info!("Reading datasets from {}", path.display());
            Session::new(Config::default().with_data_dir(path))
        }
        None => Session::default(),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    print_menu();
    loop {
        let Some(choice) = ask(&mut input, "\nEnter command: ")? else {
            return Ok(());
        };
        if let Err(err) = session.require(Command::requirements(&choice)) {
            println!("{err}");
            continue;
        }
        let argument = match Command::prompt(&choice) {
            Some(prompt) => match ask(&mut input, prompt)? {
                Some(argument) => argument,
                None => return Ok(()),
            },
            None => String::new(),
        };
        let Some(command) = Command::from_menu(&choice, &argument) else {
            println!("Invalid Option");
            continue;
        };

        match session.execute(command) {
            Ok(Reply::Quit) => return Ok(()),
            Ok(Reply::ViewReady) => {
                run_map(&session, &mut input)?;
                print_menu();
            }
            Ok(reply) => print_reply(&reply),
            Err(err @ session::Error::NotLoaded(_)) => println!("{err}"),
            Err(err) => error!("{err}"),
        }
    }
}
