use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_facilities_table::Migration),
            Box::new(m20240301_000002_create_type_tables::Migration),
            Box::new(m20240301_000003_create_operations_table::Migration),
            Box::new(m20240301_000004_create_spaces_table::Migration),
            Box::new(m20240301_000005_create_notifications_table::Migration),
        ]
    }
}

mod m20240301_000001_create_facilities_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_facilities_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Facilities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Facilities::Code)
                                .string()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Facilities::Name).string().not_null())
                        .col(ColumnDef::new(Facilities::Street).string().not_null())
                        .col(ColumnDef::new(Facilities::City).string().not_null())
                        .col(ColumnDef::new(Facilities::State).string().not_null())
                        .col(ColumnDef::new(Facilities::PostalCode).string().not_null())
                        .col(ColumnDef::new(Facilities::Latitude).double().not_null())
                        .col(ColumnDef::new(Facilities::Longitude).double().not_null())
                        .col(
                            ColumnDef::new(Facilities::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Facilities::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Facilities::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Facilities {
        Table,
        Code,
        Name,
        Street,
        City,
        State,
        PostalCode,
        Latitude,
        Longitude,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000002_create_type_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_type_tables"
        }
    }

    fn type_table<T: Iden + Copy + 'static>(table: T, columns: [T; 5]) -> TableCreateStatement {
        let [id, name, description, created_at, updated_at] = columns;
        Table::create()
            .table(table)
            .if_not_exists()
            .col(ColumnDef::new(id).uuid().primary_key().not_null())
            .col(ColumnDef::new(name).string().not_null().unique_key())
            .col(ColumnDef::new(description).string().null())
            .col(
                ColumnDef::new(created_at)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(ColumnDef::new(updated_at).timestamp_with_time_zone().null())
            .to_owned()
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(type_table(
                    TypeTable::OperationTypes,
                    [
                        TypeTable::Id,
                        TypeTable::Name,
                        TypeTable::Description,
                        TypeTable::CreatedAt,
                        TypeTable::UpdatedAt,
                    ],
                ))
                .await?;

            manager
                .create_table(type_table(
                    TypeTable::SpaceTypes,
                    [
                        TypeTable::Id,
                        TypeTable::Name,
                        TypeTable::Description,
                        TypeTable::CreatedAt,
                        TypeTable::UpdatedAt,
                    ],
                ))
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(TypeTable::SpaceTypes).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(TypeTable::OperationTypes).to_owned())
                .await
        }
    }

    /// Both taxonomies share one column layout.
    #[derive(DeriveIden, Clone, Copy)]
    pub(super) enum TypeTable {
        OperationTypes,
        SpaceTypes,
        Id,
        Name,
        Description,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000003_create_operations_table {

    use super::m20240301_000001_create_facilities_table::Facilities;
    use super::m20240301_000002_create_type_tables::TypeTable;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000003_create_operations_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Operations::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Operations::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Operations::FacilityId).string().not_null())
                        .col(ColumnDef::new(Operations::OperationTypeId).uuid().not_null())
                        .col(ColumnDef::new(Operations::Description).string().not_null())
                        .col(ColumnDef::new(Operations::Poc).string().null())
                        .col(ColumnDef::new(Operations::Email).string().null())
                        .col(ColumnDef::new(Operations::Phone).string().null())
                        .col(ColumnDef::new(Operations::Url).string().null())
                        .col(ColumnDef::new(Operations::Room).string().null())
                        .col(ColumnDef::new(Operations::OperationalHours).json().null())
                        .col(
                            ColumnDef::new(Operations::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Operations::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_operations_facility")
                                .from(Operations::Table, Operations::FacilityId)
                                .to(Facilities::Table, Facilities::Code)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_operations_operation_type")
                                .from(Operations::Table, Operations::OperationTypeId)
                                .to(TypeTable::OperationTypes, TypeTable::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            // The (facility, type, description) triple identifies an operation
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_operations_facility_type_description")
                        .table(Operations::Table)
                        .col(Operations::FacilityId)
                        .col(Operations::OperationTypeId)
                        .col(Operations::Description)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_operations_operation_type_id")
                        .table(Operations::Table)
                        .col(Operations::OperationTypeId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Operations::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Operations {
        Table,
        Id,
        FacilityId,
        OperationTypeId,
        Description,
        Poc,
        Email,
        Phone,
        Url,
        Room,
        OperationalHours,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000004_create_spaces_table {

    use super::m20240301_000001_create_facilities_table::Facilities;
    use super::m20240301_000002_create_type_tables::TypeTable;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000004_create_spaces_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Spaces::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Spaces::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Spaces::FacilityId).string().not_null())
                        .col(ColumnDef::new(Spaces::SpaceTypeId).uuid().not_null())
                        .col(ColumnDef::new(Spaces::Description).string().not_null())
                        .col(
                            ColumnDef::new(Spaces::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Spaces::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_spaces_facility")
                                .from(Spaces::Table, Spaces::FacilityId)
                                .to(Facilities::Table, Facilities::Code)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_spaces_space_type")
                                .from(Spaces::Table, Spaces::SpaceTypeId)
                                .to(TypeTable::SpaceTypes, TypeTable::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .unique()
                        .name("idx_spaces_facility_type_description")
                        .table(Spaces::Table)
                        .col(Spaces::FacilityId)
                        .col(Spaces::SpaceTypeId)
                        .col(Spaces::Description)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Spaces::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Spaces {
        Table,
        Id,
        FacilityId,
        SpaceTypeId,
        Description,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000005_create_notifications_table {

    use super::m20240301_000001_create_facilities_table::Facilities;
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000005_create_notifications_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Notifications::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Notifications::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Notifications::FacilityId).string().not_null())
                        .col(ColumnDef::new(Notifications::Title).string().not_null())
                        .col(ColumnDef::new(Notifications::Description).string().not_null())
                        .col(
                            ColumnDef::new(Notifications::StartsOn)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Notifications::EndsOn)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Notifications::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Notifications::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_notifications_facility")
                                .from(Notifications::Table, Notifications::FacilityId)
                                .to(Facilities::Table, Facilities::Code)
                                .on_delete(ForeignKeyAction::Restrict)
                                .on_update(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_notifications_facility_id")
                        .table(Notifications::Table)
                        .col(Notifications::FacilityId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Notifications::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Notifications {
        Table,
        Id,
        FacilityId,
        Title,
        Description,
        StartsOn,
        EndsOn,
        CreatedAt,
        UpdatedAt,
    }
}
