use crate::core::actions::render_tiled::ports::colour_map::ColourMap;
use crate::core::actions::render_tiled::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::colour::Colour;
use crate::core::data::point::Point;

/// Runs an algorithm and pushes each result straight through a colour map, so
/// a colour raster is produced in a single pass.
#[derive(Debug, Clone)]
pub struct ColouredAlgorithm<Alg, Map> {
    algorithm: Alg,
    colour_map: Map,
}

impl<Alg, Map> ColouredAlgorithm<Alg, Map> {
    #[must_use]
    pub fn new(algorithm: Alg, colour_map: Map) -> Self {
        Self {
            algorithm,
            colour_map,
        }
    }
}

impl<Alg, Map> FractalAlgorithm for ColouredAlgorithm<Alg, Map>
where
    Alg: FractalAlgorithm,
    Map: ColourMap<T = Alg::Success>,
{
    type Success = Colour;

    #[inline]
    fn compute(&self, pixel: Point) -> Colour {
        self.colour_map.map(self.algorithm.compute(pixel))
    }
}
