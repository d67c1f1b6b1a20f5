pub mod course;
pub mod draft;
pub mod email;
pub mod instructor;
pub mod registration;
pub mod settings;
pub mod webinar;

pub mod filter {
    use bson::spec::BinarySubtype;
    use bson::{doc, Bson, Document};
    use uuid::Uuid;

    #[inline]
    pub fn uuid_bson(id: Uuid) -> Bson {
        Bson::Binary(bson::Binary {
            subtype: BinarySubtype::Uuid,
            bytes: id.as_bytes().to_vec(),
        })
    }

    #[inline]
    pub fn by_id(id: Uuid) -> Document {
        doc! { "_id": uuid_bson(id) }
    }

    #[inline]
    pub fn id_in(ids: &[Uuid]) -> Document {
        let ids: Vec<Bson> = ids.iter().copied().map(uuid_bson).collect();
        doc! { "_id": { "$in": ids } }
    }
}
