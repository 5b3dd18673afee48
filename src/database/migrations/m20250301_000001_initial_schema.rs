use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign keys: references between these tables are checked in the application
        self.create_carpark_table(manager).await?;
        self.create_zone_table(manager).await?;
        self.create_camera_table(manager).await?;
        self.create_sign_table(manager).await?;
        self.create_api_key_table(manager).await?;
        self.create_user_table(manager).await?;
        self.create_presentcar_table(manager).await?;
        self.create_zone_images_table(manager).await?;

        self.create_indexes(manager).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ZoneImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Presentcar::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ApiKey::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sign::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Camera::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Zone::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Carpark::Table).to_owned())
            .await?;

        Ok(())
    }
}

impl Migration {
    fn create_id_column(&self, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        col.integer().not_null().auto_increment().primary_key();
        col
    }

    fn create_flag_column(&self, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        col.boolean().not_null().default(false);
        col
    }

    fn create_timestamp_column(&self, manager: &SchemaManager, column: impl IntoIden) -> ColumnDef {
        let mut col = ColumnDef::new(column);
        match manager.get_database_backend() {
            sea_orm::DatabaseBackend::Sqlite => col.string(),
            _ => col.timestamp_with_time_zone(),
        };
        col
    }

    async fn create_carpark_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Carpark::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Carpark::Id))
                    .col(ColumnDef::new(Carpark::Type).string().not_null())
                    .col(ColumnDef::new(Carpark::Name).string().not_null())
                    .col(ColumnDef::new(Carpark::Capacity).integer().not_null().default(0))
                    .col(ColumnDef::new(Carpark::Language).json())
                    .col(ColumnDef::new(Carpark::Extra).json())
                    .to_owned(),
            )
            .await
    }

    async fn create_zone_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Zone::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Zone::Id))
                    .col(ColumnDef::new(Zone::ZoneId).integer().not_null().unique_key())
                    .col(ColumnDef::new(Zone::CarparkId).integer().not_null())
                    .col(ColumnDef::new(Zone::Name).string().not_null())
                    .col(ColumnDef::new(Zone::MaxCapacity).integer().not_null().default(0))
                    .col(ColumnDef::new(Zone::FreeCapacity).integer().not_null().default(0))
                    .col(
                        self.create_timestamp_column(manager, Zone::LastUpdate)
                            .null()
                            .to_owned(),
                    )
                    .col(self.create_flag_column(Zone::IsEnabled))
                    .col(self.create_flag_column(Zone::IsDeleted))
                    .col(ColumnDef::new(Zone::Extra).json())
                    .to_owned(),
            )
            .await
    }

    async fn create_camera_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Camera::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Camera::Id))
                    .col(ColumnDef::new(Camera::CamName).string().not_null())
                    .col(ColumnDef::new(Camera::CamType).string().not_null())
                    .col(ColumnDef::new(Camera::CamIp).string().not_null())
                    .col(ColumnDef::new(Camera::CamPort).integer().not_null().default(0))
                    .col(ColumnDef::new(Camera::CamUser).string().not_null())
                    .col(ColumnDef::new(Camera::CamPassword).string().not_null())
                    .col(ColumnDef::new(Camera::ZoneIdIn).integer().not_null().default(0))
                    .col(ColumnDef::new(Camera::ZoneIdOut).integer().not_null().default(0))
                    .col(ColumnDef::new(Camera::Direction).string().not_null())
                    .col(self.create_flag_column(Camera::IsEnabled))
                    .col(self.create_flag_column(Camera::IsDeleted))
                    .col(ColumnDef::new(Camera::Extra).json())
                    .to_owned(),
            )
            .await
    }

    async fn create_sign_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sign::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Sign::Id))
                    .col(ColumnDef::new(Sign::SignId).integer().not_null().unique_key())
                    .col(ColumnDef::new(Sign::SignName).string().not_null())
                    .col(ColumnDef::new(Sign::SignType).string().not_null())
                    .col(ColumnDef::new(Sign::SignIp).string().not_null())
                    .col(ColumnDef::new(Sign::SignPort).integer().not_null().default(0))
                    .col(ColumnDef::new(Sign::ZoneId).integer().not_null().default(0))
                    .col(self.create_flag_column(Sign::IsEnabled))
                    .col(self.create_flag_column(Sign::IsDeleted))
                    .to_owned(),
            )
            .await
    }

    async fn create_api_key_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApiKey::Table)
                    .if_not_exists()
                    .col(self.create_id_column(ApiKey::Id))
                    .col(ColumnDef::new(ApiKey::ClientName).string().not_null())
                    .col(ColumnDef::new(ApiKey::ClientId).string().not_null().unique_key())
                    .col(ColumnDef::new(ApiKey::ClientSecret).string().not_null())
                    .col(ColumnDef::new(ApiKey::ApiKey).string().not_null())
                    .col(self.create_flag_column(ApiKey::FuzzyLogic))
                    .col(self.create_flag_column(ApiKey::IsEnabled))
                    .col(self.create_flag_column(ApiKey::IsDeleted))
                    .to_owned(),
            )
            .await
    }

    async fn create_user_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(self.create_id_column(User::Id))
                    .col(ColumnDef::new(User::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(User::Password).string().not_null())
                    .col(ColumnDef::new(User::FirstName).string().not_null())
                    .col(ColumnDef::new(User::LastName).string().not_null())
                    .col(ColumnDef::new(User::Role).string().not_null())
                    .col(self.create_flag_column(User::IsEnabled))
                    .col(self.create_flag_column(User::IsDeleted))
                    .to_owned(),
            )
            .await
    }

    async fn create_presentcar_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Presentcar::Table)
                    .if_not_exists()
                    .col(self.create_id_column(Presentcar::Id))
                    .col(ColumnDef::new(Presentcar::CarDetailsId).integer().not_null().default(0))
                    .col(ColumnDef::new(Presentcar::CameraId).integer().not_null())
                    .col(ColumnDef::new(Presentcar::Confidence).integer().not_null().default(0))
                    .col(ColumnDef::new(Presentcar::CurrZoneId).integer().not_null())
                    .col(ColumnDef::new(Presentcar::LastZoneId).integer().not_null())
                    .col(ColumnDef::new(Presentcar::Direction).string().not_null())
                    .col(ColumnDef::new(Presentcar::Lpn).string().not_null())
                    .col(
                        self.create_timestamp_column(manager, Presentcar::TransactionDate)
                            .not_null()
                            .to_owned(),
                    )
                    .col(ColumnDef::new(Presentcar::Extra).json())
                    .to_owned(),
            )
            .await
    }

    async fn create_zone_images_table(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ZoneImages::Table)
                    .if_not_exists()
                    .col(self.create_id_column(ZoneImages::Id))
                    .col(ColumnDef::new(ZoneImages::ZoneId).integer().not_null())
                    .col(ColumnDef::new(ZoneImages::Lang).string().not_null())
                    .col(ColumnDef::new(ZoneImages::ImageS).text().not_null())
                    .col(ColumnDef::new(ZoneImages::ImageL).text().not_null())
                    .col(ColumnDef::new(ZoneImages::Extra).json())
                    .to_owned(),
            )
            .await
    }

    async fn create_indexes(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_zone_carpark_id")
                    .table(Zone::Table)
                    .col(Zone::CarparkId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_zone_is_deleted")
                    .table(Zone::Table)
                    .col(Zone::IsDeleted)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_camera_is_deleted")
                    .table(Camera::Table)
                    .col(Camera::IsDeleted)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_presentcar_curr_zone_id")
                    .table(Presentcar::Table)
                    .col(Presentcar::CurrZoneId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_presentcar_lpn")
                    .table(Presentcar::Table)
                    .col(Presentcar::Lpn)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_zone_images_zone_id_lang")
                    .table(ZoneImages::Table)
                    .col(ZoneImages::ZoneId)
                    .col(ZoneImages::Lang)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Carpark {
    Table,
    Id,
    Type,
    Name,
    Capacity,
    Language,
    Extra,
}

#[derive(DeriveIden)]
enum Zone {
    Table,
    Id,
    ZoneId,
    CarparkId,
    Name,
    MaxCapacity,
    FreeCapacity,
    LastUpdate,
    IsEnabled,
    IsDeleted,
    Extra,
}

#[derive(DeriveIden)]
enum Camera {
    Table,
    Id,
    CamName,
    CamType,
    CamIp,
    CamPort,
    CamUser,
    CamPassword,
    ZoneIdIn,
    ZoneIdOut,
    Direction,
    IsEnabled,
    IsDeleted,
    Extra,
}

#[derive(DeriveIden)]
enum Sign {
    Table,
    Id,
    SignId,
    SignName,
    SignType,
    SignIp,
    SignPort,
    ZoneId,
    IsEnabled,
    IsDeleted,
}

#[derive(DeriveIden)]
enum ApiKey {
    Table,
    Id,
    ClientName,
    ClientId,
    ClientSecret,
    ApiKey,
    FuzzyLogic,
    IsEnabled,
    IsDeleted,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Username,
    Password,
    FirstName,
    LastName,
    Role,
    IsEnabled,
    IsDeleted,
}

#[derive(DeriveIden)]
enum Presentcar {
    Table,
    Id,
    CarDetailsId,
    CameraId,
    Confidence,
    CurrZoneId,
    LastZoneId,
    Direction,
    Lpn,
    TransactionDate,
    Extra,
}

#[derive(DeriveIden)]
enum ZoneImages {
    Table,
    Id,
    ZoneId,
    Lang,
    ImageS,
    ImageL,
    Extra,
}
