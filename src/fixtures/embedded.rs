// Fixture files compiled into the binary

pub(super) const MANIFEST: &str = include_str!("data/fixtures.toml");

const FILES: &[(&str, &str)] = &[
    (
        "last1hour5mins.json",
        include_str!("data/last1hour5mins.json"),
    ),
    (
        "last3hours15mins.json",
        include_str!("data/last3hours15mins.json"),
    ),
    (
        "last6hours30mins.json",
        include_str!("data/last6hours30mins.json"),
    ),
    (
        "last24hoursHourly.json",
        include_str!("data/last24hoursHourly.json"),
    ),
    (
        "last7daysDaily.json",
        include_str!("data/last7daysDaily.json"),
    ),
    (
        "last24hoursMerchantsHourly.json",
        include_str!("data/last24hoursMerchantsHourly.json"),
    ),
];

pub(super) fn file(name: &str) -> Option<&'static str> {
    FILES
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, contents)| *contents)
}
