//! Fixed branch registry.

/// Every valid branch, in display order.
pub const BRANCHES: [&str; 23] = [
    "1901 - PT. APL JAKARTA",
    "1902 - PT. APL BANDUNG",
    "1903 - PT. APL SEMARANG",
    "1904 - PT. APL YOGYAKARTA",
    "1905 - PT. APL SURABAYA",
    "1906 - PT. APL MALANG",
    "1907 - PT. APL DENPASAR",
    "1921 - PT. APL PONTIANAK",
    "1922 - PT. APL BANJARMASIN",
    "1923 - PT. APL SAMARINDA",
    "1924 - PT. APL BALIKPAPAN",
    "1931 - PT. APL MAKASSAR",
    "1932 - PT. APL MANADO",
    "1933 - PT. APL KENDARI",
    "1934 - PT. APL PALU",
    "1941 - PT. APL AMBON",
    "1942 - PT. APL JAYAPURA",
    "1951 - PT. APL MEDAN",
    "1952 - PT. APL PEKANBARU",
    "1953 - PT. APL PADANG",
    "1954 - PT. APL PALEMBANG",
    "1955 - PT. APL JAMBI",
    "1956 - PT. APL LAMPUNG",
];

const COMPANY_PREFIX: &str = "PT. APL ";

/// City portion of a registry entry: `"1951 - PT. APL MEDAN"` → `"MEDAN"`.
pub fn short_name(branch: &str) -> &str {
    let rest = branch.split_once(" - ").map_or(branch, |(_, rest)| rest);
    rest.strip_prefix(COMPANY_PREFIX).unwrap_or(rest)
}

/// Position in the registry, used as a stable tie-break when sorting.
pub fn registry_index(branch: &str) -> Option<usize> {
    BRANCHES.iter().position(|b| *b == branch)
}
