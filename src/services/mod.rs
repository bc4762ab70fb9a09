// ============================================================================
// Reference Services - in-process implementations of the pricing ports
// ============================================================================
//
// Promo codes, FX rates and risk limits are fixed tables injected at
// construction; `Default` carries the demo values.
//
// ============================================================================

mod fx;
mod promo;
mod risk;

pub use fx::FixedRateFxConverter;
pub use promo::SimplePromoService;
pub use risk::ThresholdRiskChecker;
