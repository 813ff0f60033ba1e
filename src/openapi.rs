use utoipa::OpenApi;

use crate::models::{Booking, BookingRequest, ClassOut};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::list_classes,
        crate::handlers::book_class,
        crate::handlers::get_bookings
    ),
    components(schemas(ClassOut, Booking, BookingRequest)),
    tags(
        (name = "booking", description = "Fitness class booking operations")
    ),
)]
pub struct ApiDoc;
