use utoipa::OpenApi;

use crate::{
    api::handlers::{members, root},
    domain::{Member, MemberSummary, TShirtCount, TShirtSize, YesNo},
    validation::{MemberInput, MemberPatchInput},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Youth Registry API",
        description = "Registration of youth-group members"
    ),
    paths(
        members::list,
        members::create,
        members::summary,
        members::get,
        members::update,
        members::delete,
        root::health_check,
    ),
    components(schemas(
        Member,
        MemberInput,
        MemberPatchInput,
        MemberSummary,
        TShirtCount,
        TShirtSize,
        YesNo,
        members::DeleteResponse,
    )),
    tags(
        (name = "members", description = "Create, list, edit and remove registrations"),
        (name = "status", description = "Liveness")
    )
)]
pub struct ApiDoc;
