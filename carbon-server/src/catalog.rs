//! Route distance catalog.
//!
//! A fixed set of known city-pair distances, loaded once at startup.
//! Lookups are symmetric: a route from A to B also answers B to A, and
//! city names are matched ignoring case and surrounding whitespace.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Errors raised when the route set is structurally broken.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// The same city pair (in either direction) appears twice
    #[error("duplicate route entry: {origin:?} ↔ {destination:?}")]
    DuplicateRoute { origin: String, destination: String },

    /// A route endpoint is empty or whitespace-only
    #[error("route has a blank city name")]
    BlankCity,

    /// A route distance is zero, negative, or not finite
    #[error("route {origin:?} ↔ {destination:?} has invalid distance {distance_km}")]
    InvalidDistance {
        origin: String,
        destination: String,
        distance_km: f64,
    },
}

/// A known route between two cities with its road distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
}

impl Route {
    pub fn new(origin: &str, destination: &str, distance_km: f64) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km,
        }
    }
}

/// Immutable catalog of known routes.
///
/// Construction validates every entry, so lookups can assume city pairs
/// are unique (in either direction) and distances are positive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteCatalog {
    routes: Vec<Route>,
}

/// Normalized form used for matching: trimmed and case-folded.
fn normalize(city: &str) -> String {
    city.trim().to_lowercase()
}

/// Sort key approximating pt-BR collation: diacritics sort adjacent to
/// their base letter ("Á" next to "A"), not after "z" as raw code points
/// would. NFD decomposition splits accented letters into base letter plus
/// combining marks, which are then dropped.
fn collation_key(city: &str) -> String {
    city.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

impl RouteCatalog {
    /// Build a catalog, validating every route.
    ///
    /// Rejects blank city names, non-positive or non-finite distances, and
    /// duplicate city pairs. Duplicates are detected on the normalized
    /// names in either direction, so "A → B" and "b → a " conflict.
    pub fn new(routes: Vec<Route>) -> Result<Self, CatalogError> {
        let mut seen: Vec<(String, String)> = Vec::with_capacity(routes.len());

        for route in &routes {
            let o = normalize(&route.origin);
            let d = normalize(&route.destination);

            if o.is_empty() || d.is_empty() {
                return Err(CatalogError::BlankCity);
            }
            if !route.distance_km.is_finite() || route.distance_km <= 0.0 {
                return Err(CatalogError::InvalidDistance {
                    origin: route.origin.clone(),
                    destination: route.destination.clone(),
                    distance_km: route.distance_km,
                });
            }
            if seen
                .iter()
                .any(|(so, sd)| (so == &o && sd == &d) || (so == &d && sd == &o))
            {
                return Err(CatalogError::DuplicateRoute {
                    origin: route.origin.clone(),
                    destination: route.destination.clone(),
                });
            }
            seen.push((o, d));
        }

        Ok(Self { routes })
    }

    /// The routes in catalog order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes in the catalog.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the catalog has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Every distinct city name appearing as origin or destination,
    /// deduplicated by exact string value and sorted by pt-BR-style
    /// collation.
    pub fn all_cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = self
            .routes
            .iter()
            .flat_map(|r| [r.origin.clone(), r.destination.clone()])
            .collect();

        // Equal strings share a collation key, so exact duplicates end up
        // adjacent and a plain dedup removes them.
        cities.sort_by(|a, b| collation_key(a).cmp(&collation_key(b)).then(a.cmp(b)));
        cities.dedup();
        cities
    }

    /// Look up the distance between two cities, searching both directions.
    ///
    /// Inputs are trimmed and case-folded before matching; empty or blank
    /// inputs short-circuit to `None` without searching. Returns the first
    /// match in catalog order, which is unique by construction.
    pub fn find_distance(&self, origin: &str, destination: &str) -> Option<f64> {
        let o = normalize(origin);
        let d = normalize(destination);

        if o.is_empty() || d.is_empty() {
            return None;
        }

        self.routes
            .iter()
            .find(|r| {
                let ro = normalize(&r.origin);
                let rd = normalize(&r.destination);
                (ro == o && rd == d) || (ro == d && rd == o)
            })
            .map(|r| r.distance_km)
    }
}

/// Builder for assembling a catalog route by route.
#[derive(Debug, Default)]
pub struct RouteCatalogBuilder {
    routes: Vec<Route>,
}

impl RouteCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route.
    pub fn add(mut self, origin: &str, destination: &str, distance_km: f64) -> Self {
        self.routes.push(Route::new(origin, destination, distance_km));
        self
    }

    /// Build the catalog, validating all routes.
    pub fn build(self) -> Result<RouteCatalog, CatalogError> {
        RouteCatalog::new(self.routes)
    }
}

/// The built-in catalog of Brazilian intercity routes.
pub fn brazil_routes() -> RouteCatalog {
    RouteCatalogBuilder::new()
        .add("São Paulo, SP", "Rio de Janeiro, RJ", 430.0)
        .add("São Paulo, SP", "Brasília, DF", 1016.0)
        .add("Rio de Janeiro, RJ", "Brasília, DF", 1148.0)
        .add("São Paulo, SP", "Campinas, SP", 95.0)
        .add("Rio de Janeiro, RJ", "Niterói, RJ", 13.0)
        .add("Belo Horizonte, MG", "Ouro Preto, MG", 100.0)
        .add("Porto Alegre, RS", "Pelotas, RS", 260.0)
        .add("Porto Alegre, RS", "Florianópolis, SC", 460.0)
        .add("Florianópolis, SC", "Curitiba, PR", 300.0)
        .add("Curitiba, PR", "São Paulo, SP", 408.0)
        .add("Salvador, BA", "Feira de Santana, BA", 110.0)
        .add("Salvador, BA", "Aracaju, SE", 330.0)
        .add("Fortaleza, CE", "Sobral, CE", 232.0)
        .add("Recife, PE", "Olinda, PE", 10.0)
        .add("Recife, PE", "João Pessoa, PB", 118.0)
        .add("Natal, RN", "Mossoró, RN", 283.0)
        .add("Belém, PA", "Santarém, PA", 640.0)
        .add("Manaus, AM", "Parintins, AM", 369.0)
        .add("Cuiabá, MT", "Várzea Grande, MT", 10.0)
        .add("Campo Grande, MS", "Dourados, MS", 237.0)
        .add("Goiânia, GO", "Anápolis, GO", 55.0)
        .add("Brasília, DF", "Goiânia, GO", 207.0)
        .add("Vitória, ES", "Vila Velha, ES", 16.0)
        .add("Belo Horizonte, MG", "Uberlândia, MG", 480.0)
        .add("São Paulo, SP", "Santos, SP", 78.0)
        .add("Rio de Janeiro, RJ", "Petrópolis, RJ", 68.0)
        .add("São Luís, MA", "Imperatriz, MA", 630.0)
        .add("Teresina, PI", "Parnaíba, PI", 333.0)
        .add("Maceió, AL", "Arapiraca, AL", 125.0)
        .add("João Pessoa, PB", "Campina Grande, PB", 120.0)
        .add("Natal, RN", "Parnamirim, RN", 17.0)
        .add("Aracaju, SE", "Lagarto, SE", 85.0)
        .add("Belo Horizonte, MG", "Montes Claros, MG", 420.0)
        .add("Rio Branco, AC", "Cruzeiro do Sul, AC", 648.0)
        .add("Porto Velho, RO", "Guajará-Mirim, RO", 640.0)
        .build()
        .expect("built-in route catalog is valid")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Random surrounding whitespace.
    fn padding() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[ \t]{0,3}").unwrap()
    }

    /// Perturb a city name: optional upper/lowercasing plus padding.
    fn perturb(city: &str, case: u8, before: &str, after: &str) -> String {
        let cased = match case % 3 {
            0 => city.to_uppercase(),
            1 => city.to_lowercase(),
            _ => city.to_string(),
        };
        format!("{before}{cased}{after}")
    }

    proptest! {
        /// Any case/whitespace variant of a configured route resolves to
        /// the same distance in both directions.
        #[test]
        fn lookup_survives_perturbation(
            idx in 0usize..35,
            case_o in 0u8..3,
            case_d in 0u8..3,
            pad_a in padding(),
            pad_b in padding(),
        ) {
            let catalog = brazil_routes();
            let route = &catalog.routes()[idx];

            let origin = perturb(&route.origin, case_o, &pad_a, &pad_b);
            let destination = perturb(&route.destination, case_d, &pad_b, &pad_a);

            prop_assert_eq!(
                catalog.find_distance(&origin, &destination),
                Some(route.distance_km)
            );
            prop_assert_eq!(
                catalog.find_distance(&destination, &origin),
                Some(route.distance_km)
            );
        }

        /// Lookup never panics on arbitrary input and symmetry holds even
        /// for misses.
        #[test]
        fn lookup_total_and_symmetric(a in ".{0,30}", b in ".{0,30}") {
            let catalog = brazil_routes();

            prop_assert_eq!(catalog.find_distance(&a, &b), catalog.find_distance(&b, &a));
        }
    }
}
