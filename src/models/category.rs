// src/models/category.rs
// DOCUMENTATION: Fixed enumeration of searchable place categories
// PURPOSE: Map each category to the keyword and Places type sent upstream

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category selected by the user for a nearby search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Restaurant,
    Shop,
    Hotel,
    Park,
    Museum,
    Library,
    Mall,
    Cafe,
    Hospital,
    Pharmacy,
    Theater,
    Stadium,
    School,
    University,
    Zoo,
    AmusementPark,
    ArtGallery,
    GasStation,
    Atm,
    PostOffice,
    Bank,
    Church,
    Mosque,
    Temple,
    Clinic,
    Pub,
    Brewery,
    Bars,
    Gyms,
    Hostels,
    PayingGuest,
    LiveMusic,
    Supermarkets,
    Electronics,
    Rentals,
    MartialArts,
    Viewpoints,
    MetroStation,
    BusStop,
    RailwayStation,
}

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 40] = [
        PlaceCategory::Restaurant,
        PlaceCategory::Shop,
        PlaceCategory::Hotel,
        PlaceCategory::Park,
        PlaceCategory::Museum,
        PlaceCategory::Library,
        PlaceCategory::Mall,
        PlaceCategory::Cafe,
        PlaceCategory::Hospital,
        PlaceCategory::Pharmacy,
        PlaceCategory::Theater,
        PlaceCategory::Stadium,
        PlaceCategory::School,
        PlaceCategory::University,
        PlaceCategory::Zoo,
        PlaceCategory::AmusementPark,
        PlaceCategory::ArtGallery,
        PlaceCategory::GasStation,
        PlaceCategory::Atm,
        PlaceCategory::PostOffice,
        PlaceCategory::Bank,
        PlaceCategory::Church,
        PlaceCategory::Mosque,
        PlaceCategory::Temple,
        PlaceCategory::Clinic,
        PlaceCategory::Pub,
        PlaceCategory::Brewery,
        PlaceCategory::Bars,
        PlaceCategory::Gyms,
        PlaceCategory::Hostels,
        PlaceCategory::PayingGuest,
        PlaceCategory::LiveMusic,
        PlaceCategory::Supermarkets,
        PlaceCategory::Electronics,
        PlaceCategory::Rentals,
        PlaceCategory::MartialArts,
        PlaceCategory::Viewpoints,
        PlaceCategory::MetroStation,
        PlaceCategory::BusStop,
        PlaceCategory::RailwayStation,
    ];

    /// Human readable label, also sent as the search keyword
    pub fn label(&self) -> &'static str {
        match self {
            PlaceCategory::Restaurant => "Restaurants and dinein",
            PlaceCategory::Shop => "Shopping",
            PlaceCategory::Hotel => "Hotels",
            PlaceCategory::Park => "Park",
            PlaceCategory::Museum => "Museums",
            PlaceCategory::Library => "Library",
            PlaceCategory::Mall => "Malls",
            PlaceCategory::Cafe => "Cafe",
            PlaceCategory::Hospital => "Hospitals",
            PlaceCategory::Pharmacy => "Pharmacy",
            PlaceCategory::Theater => "Movie Theaters",
            PlaceCategory::Stadium => "Stadiums",
            PlaceCategory::School => "Schools",
            PlaceCategory::University => "Universities",
            PlaceCategory::Zoo => "Zoo",
            PlaceCategory::AmusementPark => "Amusement Park",
            PlaceCategory::ArtGallery => "Art Gallery",
            PlaceCategory::GasStation => "Gas Stations",
            PlaceCategory::Atm => "Atm",
            PlaceCategory::PostOffice => "Post Office",
            PlaceCategory::Bank => "Bank",
            PlaceCategory::Church => "Church",
            PlaceCategory::Mosque => "Mosque",
            PlaceCategory::Temple => "Temples",
            PlaceCategory::Clinic => "Clinic",
            PlaceCategory::Pub => "Pubs",
            PlaceCategory::Brewery => "Brewery",
            PlaceCategory::Bars => "Bars",
            PlaceCategory::Gyms => "Gyms",
            PlaceCategory::Hostels => "Hostels",
            PlaceCategory::PayingGuest => "PG",
            PlaceCategory::LiveMusic => "Live Music",
            PlaceCategory::Supermarkets => "Super Markets",
            PlaceCategory::Electronics => "Electronics",
            PlaceCategory::Rentals => "Bike and car Rentals",
            PlaceCategory::MartialArts => "martial arts",
            PlaceCategory::Viewpoints => "View Points and popular places",
            PlaceCategory::MetroStation => "Metro Stations",
            PlaceCategory::BusStop => "Bus stands",
            PlaceCategory::RailwayStation => "Railway Stations",
        }
    }

    /// Places API `type` filter, when the category has a direct equivalent
    /// Categories without one are searched by keyword only
    pub fn api_type(&self) -> Option<&'static str> {
        let api_type = match self {
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::Shop => "store",
            PlaceCategory::Hotel | PlaceCategory::Hostels => "lodging",
            PlaceCategory::Park => "park",
            PlaceCategory::Museum => "museum",
            PlaceCategory::Library => "library",
            PlaceCategory::Mall => "shopping_mall",
            PlaceCategory::Cafe => "cafe",
            PlaceCategory::Hospital => "hospital",
            PlaceCategory::Pharmacy => "pharmacy",
            PlaceCategory::Theater => "movie_theater",
            PlaceCategory::Stadium => "stadium",
            PlaceCategory::School => "school",
            PlaceCategory::University => "university",
            PlaceCategory::Zoo => "zoo",
            PlaceCategory::AmusementPark => "amusement_park",
            PlaceCategory::ArtGallery => "art_gallery",
            PlaceCategory::GasStation => "gas_station",
            PlaceCategory::Atm => "atm",
            PlaceCategory::PostOffice => "post_office",
            PlaceCategory::Bank => "bank",
            PlaceCategory::Church => "church",
            PlaceCategory::Mosque => "mosque",
            PlaceCategory::Temple => "hindu_temple",
            PlaceCategory::Clinic => "doctor",
            PlaceCategory::Pub | PlaceCategory::Bars => "bar",
            PlaceCategory::Gyms => "gym",
            PlaceCategory::Supermarkets => "supermarket",
            PlaceCategory::Electronics => "electronics_store",
            PlaceCategory::Rentals => "car_rental",
            PlaceCategory::Viewpoints => "tourist_attraction",
            PlaceCategory::MetroStation => "subway_station",
            PlaceCategory::BusStop => "bus_station",
            PlaceCategory::RailwayStation => "train_station",
            PlaceCategory::Brewery
            | PlaceCategory::PayingGuest
            | PlaceCategory::LiveMusic
            | PlaceCategory::MartialArts => return None,
        };
        Some(api_type)
    }

    /// Stable snake_case key, matching the serde representation
    pub fn key(&self) -> &'static str {
        match self {
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::Shop => "shop",
            PlaceCategory::Hotel => "hotel",
            PlaceCategory::Park => "park",
            PlaceCategory::Museum => "museum",
            PlaceCategory::Library => "library",
            PlaceCategory::Mall => "mall",
            PlaceCategory::Cafe => "cafe",
            PlaceCategory::Hospital => "hospital",
            PlaceCategory::Pharmacy => "pharmacy",
            PlaceCategory::Theater => "theater",
            PlaceCategory::Stadium => "stadium",
            PlaceCategory::School => "school",
            PlaceCategory::University => "university",
            PlaceCategory::Zoo => "zoo",
            PlaceCategory::AmusementPark => "amusement_park",
            PlaceCategory::ArtGallery => "art_gallery",
            PlaceCategory::GasStation => "gas_station",
            PlaceCategory::Atm => "atm",
            PlaceCategory::PostOffice => "post_office",
            PlaceCategory::Bank => "bank",
            PlaceCategory::Church => "church",
            PlaceCategory::Mosque => "mosque",
            PlaceCategory::Temple => "temple",
            PlaceCategory::Clinic => "clinic",
            PlaceCategory::Pub => "pub",
            PlaceCategory::Brewery => "brewery",
            PlaceCategory::Bars => "bars",
            PlaceCategory::Gyms => "gyms",
            PlaceCategory::Hostels => "hostels",
            PlaceCategory::PayingGuest => "paying_guest",
            PlaceCategory::LiveMusic => "live_music",
            PlaceCategory::Supermarkets => "supermarkets",
            PlaceCategory::Electronics => "electronics",
            PlaceCategory::Rentals => "rentals",
            PlaceCategory::MartialArts => "martial_arts",
            PlaceCategory::Viewpoints => "viewpoints",
            PlaceCategory::MetroStation => "metro_station",
            PlaceCategory::BusStop => "bus_stop",
            PlaceCategory::RailwayStation => "railway_station",
        }
    }
}

impl Default for PlaceCategory {
    fn default() -> Self {
        PlaceCategory::Restaurant
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PlaceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(|c: char| c == '-' || c == ' ', "_");
        PlaceCategory::ALL
            .iter()
            .copied()
            .find(|category| category.key() == wanted)
            .ok_or_else(|| format!("Unknown place category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique_and_parse_back() {
        let keys: HashSet<&str> = PlaceCategory::ALL.iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), PlaceCategory::ALL.len());

        for category in PlaceCategory::ALL {
            assert_eq!(category.key().parse::<PlaceCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_parse_is_forgiving() {
        assert_eq!("Gas Station".parse(), Ok(PlaceCategory::GasStation));
        assert_eq!("metro-station".parse(), Ok(PlaceCategory::MetroStation));
        assert!("spaceport".parse::<PlaceCategory>().is_err());
    }

    #[test]
    fn test_serde_matches_key() {
        let json = serde_json::to_string(&PlaceCategory::RailwayStation).unwrap();
        assert_eq!(json, "\"railway_station\"");
    }

    #[test]
    fn test_api_type_mapping() {
        assert_eq!(PlaceCategory::Restaurant.api_type(), Some("restaurant"));
        assert_eq!(PlaceCategory::Hotel.api_type(), Some("lodging"));
        assert_eq!(PlaceCategory::RailwayStation.api_type(), Some("train_station"));
        assert_eq!(PlaceCategory::LiveMusic.api_type(), None);
    }
}
