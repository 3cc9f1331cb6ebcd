use forecast_core::{
    LocationCandidate, Screen, SessionState,
    view::{ForecastView, candidate_label},
};

pub fn print_screen(state: &SessionState) {
    match Screen::from_state(state) {
        Screen::Loading => println!("Loading..."),
        Screen::Empty { error } => {
            println!("No forecast available.");
            if let Some(error) = error {
                println!("  {error}");
            }
        }
        Screen::Forecast(view) => {
            print_forecast(&view);
            if let Some(error) = state.last_error() {
                println!("\n(last update failed: {error})");
            }
        }
    }
}

fn print_forecast(view: &ForecastView) {
    println!();
    println!("  {}", view.headline());
    println!("  {} {}  {}", view.asset.glyph(), view.temperature, view.condition);
    println!("  wind {}   humidity {}   sunrise {}", view.wind, view.humidity, view.sunrise);

    if view.days.is_empty() {
        return;
    }

    println!();
    println!("  Daily Forecast");
    for day in &view.days {
        println!("  {:<10} {} {:>7}", day.day_name, day.asset.glyph(), day.avg_temp);
    }
    println!();
}

pub fn print_candidates(candidates: &[LocationCandidate]) {
    if candidates.is_empty() {
        println!("No matching cities.");
        return;
    }
    for candidate in candidates {
        println!("{}", candidate_label(candidate));
    }
}
