//! Bundled distribution points for Mumbai, Navi Mumbai and Thane.

use std::collections::BTreeMap;

use super::{Catalog, Coordinates, ResourceRecord};
use crate::types::ResourceCategory;

const STATE: &str = "Maharashtra";

const CITIES: &[&str] = &["Mumbai", "Navi Mumbai", "Thane"];

const REGIONS_BY_CITY: &[(&str, &[&str])] = &[
    (
        "Mumbai",
        &["Colaba", "Dadar", "Worli", "Bandra West", "Andheri East", "Dharavi"],
    ),
    ("Navi Mumbai", &["Vashi", "Nerul", "CBD Belapur", "Kharghar"]),
    ("Thane", &["Ghodbunder Road", "Naupada", "Kopri"]),
];

struct Entry {
    id: &'static str,
    name: &'static str,
    category: ResourceCategory,
    address: &'static str,
    city: &'static str,
    region: &'static str,
    postal_code: &'static str,
    coordinates: (f64, f64),
    operating_hours: &'static str,
    eligibility: &'static [&'static str],
    documents: &'static [&'static str],
    phone: Option<&'static str>,
    verified_at: &'static str,
    delivery: bool,
}

const ENTRIES: &[Entry] = &[
    Entry {
        id: "mum-001",
        name: "Suvidha Kendra - Colaba Municipal Dispensary",
        category: ResourceCategory::Government,
        address: "Municipal Dispensary, Shahid Bhagat Singh Road",
        city: "Mumbai",
        region: "Colaba",
        postal_code: "400005",
        coordinates: (18.9067, 72.8147),
        operating_hours: "Mon-Sat, 9 AM - 4 PM",
        eligibility: &["Women and girls aged 10-49", "Mumbai residents"],
        documents: &["Any photo ID"],
        phone: Some("+912222150001"),
        verified_at: "2024-11-02",
        delivery: false,
    },
    Entry {
        id: "mum-002",
        name: "Myna Mahila Foundation - Dadar Hub",
        category: ResourceCategory::Ngo,
        address: "2nd Floor, Kohinoor Square, N.C. Kelkar Road",
        city: "Mumbai",
        region: "Dadar",
        postal_code: "400028",
        coordinates: (19.0213, 72.8424),
        operating_hours: "Mon-Fri, 10 AM - 6 PM",
        eligibility: &["Open to all women"],
        documents: &["None required"],
        phone: Some("+919820000002"),
        verified_at: "2024-12-14",
        delivery: true,
    },
    Entry {
        id: "mum-003",
        name: "Worli Koliwada Community Centre",
        category: ResourceCategory::Community,
        address: "Koliwada Chowk, Worli Village",
        city: "Mumbai",
        region: "Worli",
        postal_code: "400030",
        coordinates: (19.0176, 72.8162),
        operating_hours: "Daily, 8 AM - 12 PM",
        eligibility: &["Residents of Worli Koliwada"],
        documents: &["Ration card or Aadhaar"],
        phone: None,
        verified_at: "2024-10-21",
        delivery: false,
    },
    Entry {
        id: "mum-004",
        name: "Aasra Sakhi Collective - Bandra",
        category: ResourceCategory::Ngo,
        address: "Shop 4, Hill Road, near St. Peter's Church",
        city: "Mumbai",
        region: "Bandra West",
        postal_code: "400050",
        coordinates: (19.0544, 72.8331),
        operating_hours: "Tue-Sun, 11 AM - 7 PM",
        eligibility: &["Open to all women", "Priority for students"],
        documents: &["None required"],
        phone: Some("+919820000004"),
        verified_at: "2025-01-08",
        delivery: true,
    },
    Entry {
        id: "mum-005",
        name: "Andheri East Urban Health Post",
        category: ResourceCategory::Government,
        address: "Urban Health Post, Marol Naka, Andheri-Kurla Road",
        city: "Mumbai",
        region: "Andheri East",
        postal_code: "400059",
        coordinates: (19.1136, 72.8797),
        operating_hours: "Mon-Sat, 9 AM - 1 PM",
        eligibility: &["BPL card holders", "School-going girls"],
        documents: &["BPL card", "School ID for students"],
        phone: Some("+912228500005"),
        verified_at: "2024-09-30",
        delivery: false,
    },
    Entry {
        id: "mum-006",
        name: "Dharavi Stree Shakti Kendra",
        category: ResourceCategory::Ngo,
        address: "90 Feet Road, near Kala Killa",
        city: "Mumbai",
        region: "Dharavi",
        postal_code: "400017",
        coordinates: (19.0402, 72.8535),
        operating_hours: "Mon-Sat, 10 AM - 5 PM",
        eligibility: &["Open to all women"],
        documents: &["None required"],
        phone: Some("+919820000006"),
        verified_at: "2025-02-11",
        delivery: true,
    },
    Entry {
        id: "nmb-001",
        name: "NMMC Maternity Home - Vashi",
        category: ResourceCategory::Government,
        address: "Sector 10, Palm Beach Road",
        city: "Navi Mumbai",
        region: "Vashi",
        postal_code: "400703",
        coordinates: (19.0771, 72.9986),
        operating_hours: "Mon-Sat, 9 AM - 5 PM",
        eligibility: &["Navi Mumbai residents"],
        documents: &["Aadhaar card"],
        phone: Some("+912227890001"),
        verified_at: "2024-11-19",
        delivery: false,
    },
    Entry {
        id: "nmb-002",
        name: "Saheli Seva Trust - Nerul",
        category: ResourceCategory::Ngo,
        address: "Plot 22, Sector 19A, near Nerul Station",
        city: "Navi Mumbai",
        region: "Nerul",
        postal_code: "400706",
        coordinates: (19.0330, 73.0180),
        operating_hours: "Mon-Fri, 10 AM - 4 PM",
        eligibility: &["Open to all women", "Domestic workers"],
        documents: &["None required"],
        phone: Some("+919820000008"),
        verified_at: "2024-12-03",
        delivery: true,
    },
    Entry {
        id: "nmb-003",
        name: "CBD Belapur Anganwadi Cluster",
        category: ResourceCategory::Government,
        address: "Sector 15, near Belapur Fort Road",
        city: "Navi Mumbai",
        region: "CBD Belapur",
        postal_code: "400614",
        coordinates: (19.0176, 73.0389),
        operating_hours: "Mon-Sat, 9 AM - 12 PM",
        eligibility: &["Adolescent girls aged 11-18"],
        documents: &["Birth certificate or school ID"],
        phone: None,
        verified_at: "2024-08-27",
        delivery: false,
    },
    Entry {
        id: "nmb-004",
        name: "Kharghar Residents' Welfare Hall",
        category: ResourceCategory::Community,
        address: "Sector 12, Central Park Road",
        city: "Navi Mumbai",
        region: "Kharghar",
        postal_code: "410210",
        coordinates: (19.0473, 73.0699),
        operating_hours: "Sat-Sun, 10 AM - 2 PM",
        eligibility: &["Open to all women"],
        documents: &["None required"],
        phone: Some("+919820000010"),
        verified_at: "2025-01-25",
        delivery: true,
    },
    Entry {
        id: "thn-001",
        name: "Udaan Foundation - Ghodbunder Road",
        category: ResourceCategory::Ngo,
        address: "Shop 12, Hiranandani Estate, Ghodbunder Road",
        city: "Thane",
        region: "Ghodbunder Road",
        postal_code: "400607",
        coordinates: (19.2580, 72.9710),
        operating_hours: "Mon-Sat, 10 AM - 6 PM",
        eligibility: &["Open to all women"],
        documents: &["None required"],
        phone: Some("+919820000011"),
        verified_at: "2024-12-20",
        delivery: true,
    },
    Entry {
        id: "thn-002",
        name: "TMC Health Centre - Naupada",
        category: ResourceCategory::Government,
        address: "Gokhale Road, opposite Naupada Police Station",
        city: "Thane",
        region: "Naupada",
        postal_code: "400602",
        coordinates: (19.1943, 72.9710),
        operating_hours: "Mon-Sat, 9 AM - 3 PM",
        eligibility: &["Thane residents"],
        documents: &["Aadhaar card", "Address proof"],
        phone: Some("+912225330012"),
        verified_at: "2024-10-05",
        delivery: false,
    },
    Entry {
        id: "thn-003",
        name: "Kopri Mahila Mandal",
        category: ResourceCategory::Community,
        address: "Kopri Colony, near Anand Cinema",
        city: "Thane",
        region: "Kopri",
        postal_code: "400603",
        coordinates: (19.1890, 72.9810),
        operating_hours: "Wed & Sat, 4 PM - 7 PM",
        eligibility: &["Members and their families"],
        documents: &["Mandal membership card"],
        phone: None,
        verified_at: "2024-07-16",
        delivery: false,
    },
];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn record(entry: &Entry) -> ResourceRecord {
    ResourceRecord {
        id: entry.id.to_string(),
        name: entry.name.to_string(),
        category: entry.category,
        address: entry.address.to_string(),
        city: entry.city.to_string(),
        region: entry.region.to_string(),
        state: STATE.to_string(),
        postal_code: entry.postal_code.to_string(),
        coordinates: Coordinates::new(entry.coordinates.0, entry.coordinates.1),
        operating_hours: entry.operating_hours.to_string(),
        eligibility_conditions: strings(entry.eligibility),
        required_documents: strings(entry.documents),
        contact_phone: entry.phone.map(str::to_string),
        verified_at: entry.verified_at.to_string(),
        supports_delivery: entry.delivery,
    }
}

pub(super) fn catalog() -> Catalog {
    let regions_by_city: BTreeMap<String, Vec<String>> = REGIONS_BY_CITY
        .iter()
        .map(|(city, regions)| ((*city).to_string(), strings(regions)))
        .collect();

    Catalog::new(
        ENTRIES.iter().map(record).collect(),
        strings(CITIES),
        regions_by_city,
    )
}
