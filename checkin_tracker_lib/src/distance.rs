use geo_types::Point;

const STATUTE_MILES_PER_ARC_DEGREE: f64 = 60.0 * 1.1515;
const KILOMETERS_PER_STATUTE_MILE: f64 = 1.609344;
const NAUTICAL_MILES_PER_STATUTE_MILE: f64 = 0.8684;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    StatuteMiles,
    Kilometers,
    NauticalMiles,
}

/// Great-circle distance between two positions via the spherical law of cosines.
/// South latitudes and west longitudes are negative decimal degrees.
pub fn great_circle_distance(from: Point, to: Point, unit: DistanceUnit) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1 = from.y().to_radians();
    let lat2 = to.y().to_radians();
    let theta = (from.x() - to.x()).to_radians();

    let cosine = lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * theta.cos();
    // Rounding can push the cosine just outside [-1, 1] for near-identical
    // or near-antipodal positions, which would make acos return NaN
    let arc = cosine.clamp(-1.0, 1.0).acos();

    let miles = arc.to_degrees() * STATUTE_MILES_PER_ARC_DEGREE;

    match unit {
        DistanceUnit::StatuteMiles => miles,
        DistanceUnit::Kilometers => miles * KILOMETERS_PER_STATUTE_MILE,
        DistanceUnit::NauticalMiles => miles * NAUTICAL_MILES_PER_STATUTE_MILE,
    }
}
