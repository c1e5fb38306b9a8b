use crate::models::{Store, StoreDto};

pub fn to_dto(store: &Store) -> StoreDto {
    StoreDto {
        id: store.id.clone(),
        address: store.address.clone(),
        description: store.description.clone(),
    }
}

pub fn to_dto_list(stores: &[Store]) -> Vec<StoreDto> {
    stores.iter().map(to_dto).collect()
}

pub fn to_domain(dto: StoreDto) -> Store {
    Store {
        id: dto.id,
        address: dto.address,
        description: dto.description,
    }
}
