//! Station HTML page.

use maud::{html, Markup, PreEscaped, Render, DOCTYPE};

use station_common::format_idate;

use super::StationView;
use crate::archive::ArchiveStatus;

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

/// Draws the `map_data` markers: grey dots for history, a pin with an open
/// popup for the current fix.
const MAP_SCRIPT: &str = r#"
(function () {
    var data = JSON.parse(document.getElementById('map_data').textContent);
    if (!data || typeof L === 'undefined') {
        return;
    }
    var map = L.map('map').setView(data.center, data.zoom);
    L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
        attribution: '&copy; OpenStreetMap contributors'
    }).addTo(map);
    data.markers.forEach(function (m) {
        if (m.style === 'history') {
            L.circleMarker([m.lat, m.lon], {
                radius: 20 * m.scale,
                color: m.color,
                fillOpacity: 0.8
            }).addTo(map);
            return;
        }
        var marker = L.marker([m.lat, m.lon]).addTo(map);
        if (m.popup) {
            marker.bindPopup(m.popup, { autoClose: false, closeOnClick: false }).openPopup();
        }
    });
})();
"#;

/// Archive calendar state shown under the table.
#[derive(Debug, Clone)]
pub struct Calendar {
    pub min: String,
    pub max: String,
    pub image: ArchiveStatus,
}

/// Render the full page document.
pub fn render_page(view: &StationView, calendar: &Calendar) -> Markup {
    // Marker JSON for the map glue, with `</` escaped
    let map_json = serde_json::to_string(&view.map)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");
    let archive = CalendarForm {
        station: &view.station,
        calendar,
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (view.title) }
                link rel="stylesheet" href=(LEAFLET_CSS);
                script src=(LEAFLET_JS) {}
            }
            body {
                h1 { (view.title) }
                @for alert in &view.alerts {
                    div class="alert" role="alert" { (alert) }
                }
                div id="data" { (view.table) }
                div id="map" style="height: 400px" {}
                script type="application/json" id="map_data" { (PreEscaped(map_json)) }
                script { (PreEscaped(MAP_SCRIPT)) }
                (archive)
            }
        }
    }
}

struct CalendarForm<'a> {
    station: &'a str,
    calendar: &'a Calendar,
}

impl Render for CalendarForm<'_> {
    fn render(&self) -> Markup {
        let image = &self.calendar.image;
        let idate = format_idate(image.date);

        html! {
            div id="archive" {
                form id="profile_cal" method="get" action={ "/stations/" (self.station) } {
                    input type="text" name="idate" value=(idate)
                        data-min=(self.calendar.min) data-max=(self.calendar.max)
                        pattern="[0-9]{8}";
                    button type="submit" { "Show" }
                }
                @if image.exists {
                    img id="profiles" src={ "/images/" (image.file) } alt=(idate);
                }
                div id="img_status" { (image.status) }
            }
        }
    }
}
