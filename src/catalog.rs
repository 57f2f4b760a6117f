use std::fmt;

use bevy::prelude::*;

/// Closed set of renderable bodies. Ordering of `ALL` is parent-before-child
/// so a single top-to-bottom pass can resolve orbital positions.
#[derive(Reflect, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyId {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl BodyId {
    pub const ALL: [Self; Self::COUNT] = [
        Self::Sun,
        Self::Mercury,
        Self::Venus,
        Self::Earth,
        Self::Moon,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
        Self::Pluto,
    ];
    pub const COUNT: usize = 11;

    pub const fn index(self) -> usize { self as usize }
}

#[derive(Reflect, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

impl BodyKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Star => "Star",
            Self::Planet => "Planet",
            Self::Moon => "Moon",
        }
    }
}

/// Flat ring around a body (Saturn), tilted off the orbital plane.
#[derive(Clone, Copy, Debug)]
pub struct RingShape {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub tilt:         f32, // radians
    pub color:        Color,
    pub opacity:      f32,
}

/// Immutable description of one body: orbit geometry, spin, and presentation.
///
/// Orbit parameters are f64 - positions are integrated in f64 and only
/// converted to f32 at the render boundary. Angular speeds are signed;
/// negative means retrograde (Venus and Uranus spin backwards on purpose).
#[derive(Clone, Debug)]
pub struct BodyDescriptor {
    pub id:               BodyId,
    pub name:             &'static str,
    pub kind:             BodyKind,
    pub radius:           f32,
    pub distance:         f64,
    pub orbit_speed:      f64,
    pub orbit_phase:      f64,
    pub spin_speed:       f64,
    pub axial_tilt:       f32, // radians
    pub parent:           Option<BodyId>,
    pub surface_color:    Color,
    pub orbit_color:      Color,
    pub emissive_color:   Option<Color>,
    pub atmosphere_color: Option<Color>,
    pub ring:             Option<RingShape>,
    pub description:      &'static str,
    pub facts:            &'static [&'static str],
}

impl BodyDescriptor {
    /// Spin phase offset so bodies don't all start at the same meridian.
    pub fn spin_phase(&self) -> f64 { self.orbit_phase * 0.7 }
}

/// Catalog construction failures. All of these are data bugs, caught once at
/// startup - there is no runtime recovery path.
#[derive(Debug, PartialEq, Eq)]
pub enum CatalogError {
    DuplicateBody(BodyId),
    MissingBody(BodyId),
    NoAnchor,
    ExtraAnchor(BodyId),
    ZeroDistance(BodyId),
    ParentOutOfOrder { body: BodyId, parent: BodyId },
    NestedParent { body: BodyId, parent: BodyId },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateBody(id) => write!(f, "body {id:?} appears more than once"),
            Self::MissingBody(id) => write!(f, "body {id:?} is missing from the catalog"),
            Self::NoAnchor => write!(f, "no anchor body (distance 0, no parent)"),
            Self::ExtraAnchor(id) => write!(f, "body {id:?} is a second anchor"),
            Self::ZeroDistance(id) => write!(f, "non-anchor body {id:?} has distance 0"),
            Self::ParentOutOfOrder { body, parent } => {
                write!(f, "body {body:?} references parent {parent:?} defined after it")
            },
            Self::NestedParent { body, parent } => {
                write!(f, "body {body:?} orbits {parent:?}, which itself has a parent")
            },
        }
    }
}

impl std::error::Error for CatalogError {}

/// Build-once lookup over the body list, validated at construction.
#[derive(Resource, Debug)]
pub struct BodyCatalog {
    bodies: Vec<BodyDescriptor>,
    /// `BodyId::index()` -> position in `bodies`.
    slots:  [usize; BodyId::COUNT],
}

impl BodyCatalog {
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_bodies(solar_bodies())
    }

    pub fn from_bodies(bodies: Vec<BodyDescriptor>) -> Result<Self, CatalogError> {
        let slots = validate(&bodies)?;
        Ok(Self { bodies, slots })
    }

    /// Read-only metadata lookup - display layers get no mutation path.
    pub fn get(&self, id: BodyId) -> &BodyDescriptor {
        &self.bodies[self.slots[id.index()]]
    }

    /// Bodies in parent-before-child order.
    pub fn bodies(&self) -> &[BodyDescriptor] { &self.bodies }

    /// The body at the coordinate origin (the Sun).
    pub fn anchor(&self) -> &BodyDescriptor {
        // validate() guarantees exactly one anchor exists
        self.bodies
            .iter()
            .find(|body| body.distance == 0.0 && body.parent.is_none())
            .unwrap_or(&self.bodies[0])
    }

    /// Top-level orbits worth drawing a path for (planets, not moons).
    pub fn primary_orbits(&self) -> impl Iterator<Item = &BodyDescriptor> {
        self.bodies
            .iter()
            .filter(|body| body.distance > 0.0 && body.parent.is_none())
    }
}

fn validate(bodies: &[BodyDescriptor]) -> Result<[usize; BodyId::COUNT], CatalogError> {
    let mut slots = [usize::MAX; BodyId::COUNT];
    let mut anchor = None;

    for (position, body) in bodies.iter().enumerate() {
        if slots[body.id.index()] != usize::MAX {
            return Err(CatalogError::DuplicateBody(body.id));
        }
        slots[body.id.index()] = position;

        match (body.distance == 0.0, body.parent) {
            (true, None) => {
                if anchor.is_some() {
                    return Err(CatalogError::ExtraAnchor(body.id));
                }
                anchor = Some(body.id);
            },
            (true, Some(_)) => return Err(CatalogError::ZeroDistance(body.id)),
            (false, _) if body.distance <= 0.0 => {
                return Err(CatalogError::ZeroDistance(body.id));
            },
            _ => {},
        }

        if let Some(parent) = body.parent {
            let parent_position = slots[parent.index()];
            if parent_position == usize::MAX || parent_position >= position {
                return Err(CatalogError::ParentOutOfOrder {
                    body: body.id,
                    parent,
                });
            }
            if bodies[parent_position].parent.is_some() {
                return Err(CatalogError::NestedParent {
                    body: body.id,
                    parent,
                });
            }
        }
    }

    if anchor.is_none() {
        return Err(CatalogError::NoAnchor);
    }
    for id in BodyId::ALL {
        if slots[id.index()] == usize::MAX {
            return Err(CatalogError::MissingBody(id));
        }
    }

    Ok(slots)
}

/// The stylized system. Distances, speeds and phases are presentation values,
/// not astronomy - sized so every body reads on screen at once.
#[allow(clippy::too_many_lines, reason = "one entry per body, data only")]
pub fn solar_bodies() -> Vec<BodyDescriptor> {
    vec![
        BodyDescriptor {
            id:               BodyId::Sun,
            name:             "Sun",
            kind:             BodyKind::Star,
            radius:           4.8,
            distance:         0.0,
            orbit_speed:      0.0,
            orbit_phase:      0.0,
            spin_speed:       0.08,
            axial_tilt:       7.25_f32.to_radians(),
            parent:           None,
            surface_color:    Color::srgb_u8(248, 182, 103),
            orbit_color:      Color::srgb_u8(133, 86, 53),
            emissive_color:   Some(Color::srgb_u8(255, 150, 57)),
            atmosphere_color: Some(Color::srgb_u8(255, 196, 117)),
            ring:             None,
            description:      "A glowing stellar heart with amplified bloom and cinematic \
                               radiance for dramatic scenes.",
            facts:            &[
                "Contains more than 99% of the solar system mass.",
                "Surface temperatures reach around 5,500 C.",
                "Powered by hydrogen fusion deep in the core.",
            ],
        },
        BodyDescriptor {
            id:               BodyId::Mercury,
            name:             "Mercury",
            kind:             BodyKind::Planet,
            radius:           0.55,
            distance:         9.0,
            orbit_speed:      1.6,
            orbit_phase:      0.6,
            spin_speed:       0.03,
            axial_tilt:       0.03_f32.to_radians(),
            parent:           None,
            surface_color:    Color::srgb_u8(183, 162, 139),
            orbit_color:      Color::srgb_u8(77, 89, 110),
            emissive_color:   None,
            atmosphere_color: None,
            ring:             None,
            description:      "A scorched rocky world racing close to the Sun with sharp \
                               terminator contrast.",
            facts:            &[
                "Smallest planet in the solar system.",
                "A single year lasts only 88 Earth days.",
                "Almost no atmosphere to trap heat.",
            ],
        },
        BodyDescriptor {
            id:               BodyId::Venus,
            name:             "Venus",
            kind:             BodyKind::Planet,
            radius:           0.95,
            distance:         12.2,
            orbit_speed:      1.24,
            orbit_phase:      1.9,
            spin_speed:       -0.014,
            axial_tilt:       177.0_f32.to_radians(),
            parent:           None,
            surface_color:    Color::srgb_u8(230, 174, 103),
            orbit_color:      Color::srgb_u8(94, 99, 120),
            emissive_color:   None,
            atmosphere_color: Some(Color::srgb_u8(255, 200, 141)),
            ring:             None,
            description:      "A dense amber world wrapped in reflective clouds and thick \
                               atmospheric haze.",
            facts:            &[
                "Rotates backward compared with most planets.",
                "Hottest planetary surface in the system.",
                "Cloud tops are rich in sulfuric acid.",
            ],
        },
        BodyDescriptor {
            id:               BodyId::Earth,
            name:             "Earth",
            kind:             BodyKind::Planet,
            radius:           1.0,
            distance:         16.0,
            orbit_speed:      1.0,
            orbit_phase:      3.2,
            spin_speed:       0.5,
            axial_tilt:       23.4_f32.to_radians(),
            parent:           None,
            surface_color:    Color::srgb_u8(142, 194, 255),
            orbit_color:      Color::srgb_u8(111, 136, 164),
            emissive_color:   None,
            atmosphere_color: Some(Color::srgb_u8(114, 217, 255)),
            ring:             None,
            description:      "A vibrant blue world with a bright atmospheric rim and fast \
                               readable cloud motion.",
            facts:            &[
                "Only known planet with liquid surface oceans.",
                "Protected by a strong magnetic field.",
                "Its axial tilt drives familiar seasons.",
            ],
        },
        BodyDescriptor {
            id:               BodyId::Moon,
            name:             "Moon",
            kind:             BodyKind::Moon,
            radius:           0.28,
            distance:         1.9,
            orbit_speed:      5.0,
            orbit_phase:      2.4,
            spin_speed:       0.06,
            axial_tilt:       6.7_f32.to_radians(),
            parent:           Some(BodyId::Earth),
            surface_color:    Color::srgb_u8(210, 210, 207),
            orbit_color:      Color::srgb_u8(123, 135, 152),
            emissive_color:   None,
            atmosphere_color: None,
            ring:             None,
            description:      "Earths companion rendered as a fast cinematic moon orbit for \
                               visual rhythm.",
            facts:            &[
                "Average distance is roughly 384,400 km.",
                "Keeps nearly the same face toward Earth.",
                "Lunar gravity shapes ocean tides.",
            ],
        },
        BodyDescriptor {
            id:               BodyId::Mars,
            name:             "Mars",
            kind:             BodyKind::Planet,
            radius:           0.82,
            distance:         21.0,
            orbit_speed:      0.8,
            orbit_phase:      4.7,
            spin_speed:       0.48,
            axial_tilt:       25.2_f32.to_radians(),
            parent:           None,
            surface_color:    Color::srgb_u8(205, 114, 81),
            orbit_color:      Color::srgb_u8(132, 118, 122),
            emissive_color:   None,
            atmosphere_color: Some(Color::srgb_u8(234, 156, 122)),
            ring:             None,
            description:      "A dusty red desert sphere with warm glow accents and dramatic \
                               shadowing.",
            facts:            &[
                "Home to Olympus Mons, a giant volcano.",
                "Shows evidence of ancient flowing water.",
                "Has thin carbon-dioxide atmosphere.",
            ],
        },
        BodyDescriptor {
            id:               BodyId::Jupiter,
            name:             "Jupiter",
            kind:             BodyKind::Planet,
            radius:           2.9,
            distance:         30.0,
            orbit_speed:      0.44,
            orbit_phase:      0.4,
            spin_speed:       1.0,
            axial_tilt:       3.1_f32.to_radians(),
            parent:           None,
            surface_color:    Color::srgb_u8(210, 176, 142),
            orbit_color:      Color::srgb_u8(138, 127, 145),
            emissive_color:   None,
            atmosphere_color: None,
            ring:             None,
            description:      "A giant banded planet scaled for spectacle and deep gas-giant \
                               presence.",
            facts:            &[
                "Largest planet in the solar system.",
                "Great Red Spot is a long-lived storm.",
                "Likely has a rocky core under dense gases.",
            ],
        },
        BodyDescriptor {
            id:               BodyId::Saturn,
            name:             "Saturn",
            kind:             BodyKind::Planet,
            radius:           2.45,
            distance:         40.0,
            orbit_speed:      0.32,
            orbit_phase:      2.1,
            spin_speed:       0.92,
            axial_tilt:       26.7_f32.to_radians(),
            parent:           None,
            surface_color:    Color::srgb_u8(228, 199, 158),
            orbit_color:      Color::srgb_u8(140, 130, 151),
            emissive_color:   None,
            atmosphere_color: None,
            ring:             Some(RingShape {
                inner_radius: 3.0,
                outer_radius: 4.6,
                tilt:         1.6_f32.to_radians(),
                color:        Color::srgb_u8(222, 196, 161),
                opacity:      0.82,
            }),
            description:      "A majestic gas giant framed by translucent rings for a strong \
                               silhouette.",
            facts:            &[
                "Rings are mostly ice and rock particles.",
                "Its density is lower than liquid water.",
                "Hosts dozens of intriguing moons.",
            ],
        },
        BodyDescriptor {
            id:               BodyId::Uranus,
            name:             "Uranus",
            kind:             BodyKind::Planet,
            radius:           1.8,
            distance:         49.0,
            orbit_speed:      0.24,
            orbit_phase:      5.0,
            spin_speed:       -0.65,
            axial_tilt:       97.8_f32.to_radians(),
            parent:           None,
            surface_color:    Color::srgb_u8(132, 210, 217),
            orbit_color:      Color::srgb_u8(110, 127, 148),
            emissive_color:   None,
            atmosphere_color: Some(Color::srgb_u8(149, 230, 239)),
            ring:             None,
            description:      "An ice giant tipped on its side, highlighted with cool luminous \
                               tones.",
            facts:            &[
                "Extreme axial tilt causes unusual seasons.",
                "Atmosphere contains methane haze.",
                "Faint rings encircle the planet.",
            ],
        },
        BodyDescriptor {
            id:               BodyId::Neptune,
            name:             "Neptune",
            kind:             BodyKind::Planet,
            radius:           1.75,
            distance:         58.0,
            orbit_speed:      0.18,
            orbit_phase:      1.2,
            spin_speed:       0.72,
            axial_tilt:       28.3_f32.to_radians(),
            parent:           None,
            surface_color:    Color::srgb_u8(91, 137, 255),
            orbit_color:      Color::srgb_u8(98, 127, 158),
            emissive_color:   None,
            atmosphere_color: Some(Color::srgb_u8(145, 172, 255)),
            ring:             None,
            description:      "A deep cobalt giant set near the edge of the stylized system \
                               horizon.",
            facts:            &[
                "Fast winds can exceed 2,000 km/h.",
                "One orbit takes about 165 Earth years.",
                "Radiates more heat than it receives.",
            ],
        },
        BodyDescriptor {
            id:               BodyId::Pluto,
            name:             "Pluto",
            kind:             BodyKind::Planet,
            radius:           0.42,
            distance:         67.0,
            orbit_speed:      0.14,
            orbit_phase:      2.8,
            spin_speed:       -0.05,
            axial_tilt:       122.5_f32.to_radians(),
            parent:           None,
            surface_color:    Color::srgb_u8(185, 147, 121),
            orbit_color:      Color::srgb_u8(91, 111, 138),
            emissive_color:   None,
            atmosphere_color: None,
            ring:             None,
            description:      "A distant icy dwarf world with a muted bronze tint near the \
                               outer system edge.",
            facts:            &[
                "Classified as a dwarf planet in 2006.",
                "Its largest moon Charon forms a binary-like pair.",
                "A year on Pluto lasts about 248 Earth years.",
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_builds_from_shipped_data() {
        let catalog = BodyCatalog::new().expect("shipped catalog must validate");
        assert_eq!(catalog.bodies().len(), BodyId::COUNT);
    }

    #[test]
    fn anchor_is_the_sun_at_distance_zero() {
        let catalog = BodyCatalog::new().expect("valid");
        let anchor = catalog.anchor();
        assert_eq!(anchor.id, BodyId::Sun);
        assert_eq!(anchor.distance, 0.0);
        assert!(anchor.parent.is_none());
    }

    #[test]
    fn every_non_anchor_has_positive_distance() {
        let catalog = BodyCatalog::new().expect("valid");
        for body in catalog.bodies() {
            if body.id != BodyId::Sun {
                assert!(body.distance > 0.0, "{:?} has distance {}", body.id, body.distance);
            }
        }
    }

    #[test]
    fn lookup_round_trips_every_id() {
        let catalog = BodyCatalog::new().expect("valid");
        for id in BodyId::ALL {
            assert_eq!(catalog.get(id).id, id);
        }
    }

    #[test]
    fn moon_is_parented_one_level_deep() {
        let catalog = BodyCatalog::new().expect("valid");
        let moon = catalog.get(BodyId::Moon);
        assert_eq!(moon.parent, Some(BodyId::Earth));
        assert!(catalog.get(BodyId::Earth).parent.is_none());
    }

    #[test]
    fn retrograde_rates_survive_as_signed() {
        let catalog = BodyCatalog::new().expect("valid");
        assert!(catalog.get(BodyId::Venus).spin_speed < 0.0);
        assert!(catalog.get(BodyId::Uranus).spin_speed < 0.0);
    }

    #[test]
    fn primary_orbits_exclude_anchor_and_moons() {
        let catalog = BodyCatalog::new().expect("valid");
        let ids: Vec<_> = catalog.primary_orbits().map(|body| body.id).collect();
        assert!(!ids.contains(&BodyId::Sun));
        assert!(!ids.contains(&BodyId::Moon));
        assert!(ids.contains(&BodyId::Earth));
        assert_eq!(ids.len(), 9);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut bodies = solar_bodies();
        bodies[2].id = BodyId::Mercury;
        assert!(matches!(
            BodyCatalog::from_bodies(bodies),
            Err(CatalogError::DuplicateBody(BodyId::Mercury))
        ));
    }

    #[test]
    fn missing_body_is_rejected() {
        let mut bodies = solar_bodies();
        bodies.pop();
        assert!(matches!(
            BodyCatalog::from_bodies(bodies),
            Err(CatalogError::MissingBody(BodyId::Pluto))
        ));
    }

    #[test]
    fn second_anchor_is_rejected() {
        let mut bodies = solar_bodies();
        bodies[1].distance = 0.0;
        assert!(matches!(
            BodyCatalog::from_bodies(bodies),
            Err(CatalogError::ExtraAnchor(BodyId::Mercury))
        ));
    }

    #[test]
    fn parent_defined_after_child_is_rejected() {
        let mut bodies = solar_bodies();
        // move Earth behind the Moon in iteration order
        let earth_at = bodies.iter().position(|body| body.id == BodyId::Earth);
        let earth = bodies.remove(earth_at.expect("earth present"));
        bodies.push(earth);
        assert!(matches!(
            BodyCatalog::from_bodies(bodies),
            Err(CatalogError::ParentOutOfOrder {
                body: BodyId::Moon,
                parent: BodyId::Earth,
            })
        ));
    }

    #[test]
    fn two_level_nesting_is_rejected() {
        let mut bodies = solar_bodies();
        // pretend Mars orbits the Moon, which orbits Earth
        let mars_at = bodies
            .iter()
            .position(|body| body.id == BodyId::Mars)
            .expect("mars present");
        bodies[mars_at].parent = Some(BodyId::Moon);
        assert!(matches!(
            BodyCatalog::from_bodies(bodies),
            Err(CatalogError::NestedParent {
                body: BodyId::Mars,
                parent: BodyId::Moon,
            })
        ));
    }
}
