use amedas_fetcher::{ColorRamp, RAMP_SIZE};
use maud::{html, Markup};

const STOPS: usize = 9;

fn gradient(ramp: &ColorRamp) -> String {
    let stops: Vec<String> = (0..STOPS)
        .map(|i| {
            let index = i * (RAMP_SIZE - 1) / (STOPS - 1);
            let color = ramp.color_at(index);
            let percent = i * 100 / (STOPS - 1);
            format!("rgb({}, {}, {}) {}%", color.r, color.g, color.b, percent)
        })
        .collect();
    format!("linear-gradient(to right, {})", stops.join(", "))
}

/// Color bar explaining the 24-hour rainfall ramp
pub fn rainfall_legend(ramp: &ColorRamp) -> Markup {
    let (min, max) = ramp.domain();
    let mid = (min + max) / 2.0;
    html! {
        div class="rainfall-legend mt-2" style="max-width: 420px;" {
            p class="is-size-7 mb-1" { "24時間雨量 (mm)" }
            div style={ "height: 12px; border-radius: 2px; background: " (gradient(ramp)) ";" } {}
            div class="is-flex is-justify-content-space-between is-size-7" {
                span { (format!("{:.0}", min)) }
                span { (format!("{:.0}", mid)) }
                span { (format!("{:.0}+", max)) }
            }
        }
    }
}
