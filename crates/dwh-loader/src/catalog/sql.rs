//! Statement texts for the songplay star schema.
//!
//! Two staging tables (`s_events`, `s_songs`) hold raw JSON records as
//! loaded from object storage; the fact table (`f_songplays`) and four
//! dimensions (`d_users`, `d_songs`, `d_artists`, `d_time`) are filled from
//! staging by server-side inserts. All statements are idempotent
//! (`if exists` / `if not exists`) so a failed batch can be rerun.

use crate::config::StorageConfig;

// DROP TABLES

pub const S_EVENTS_DROP: &str = "drop table if exists s_events;";
pub const S_SONGS_DROP: &str = "drop table if exists s_songs;";
pub const F_SONGPLAY_DROP: &str = "drop table if exists f_songplays;";
pub const D_USER_DROP: &str = "drop table if exists d_users;";
pub const D_SONG_DROP: &str = "drop table if exists d_songs;";
pub const D_ARTIST_DROP: &str = "drop table if exists d_artists;";
pub const D_TIME_DROP: &str = "drop table if exists d_time;";

// STAGING TABLES

pub const S_EVENTS_CREATE: &str = "
    create table if not exists s_events
    (
        artist          varchar,
        auth            varchar,
        firstName       varchar,
        gender          varchar,
        itemInSession   integer,
        lastName        varchar,
        length          float,
        level           varchar,
        location        varchar,
        method          varchar,
        page            varchar,
        registration    float,
        sessionId       integer,
        song            varchar,
        status          integer,
        ts              timestamp,
        userAgent       varchar,
        userId          integer
    );
";

pub const S_SONGS_CREATE: &str = "
    create table if not exists s_songs
    (
        song_id              varchar,
        title                varchar,
        duration             float,
        year                 int,
        num_songs            int,
        artist_id            varchar,
        artist_latitude      float,
        artist_longitude     float,
        artist_location      varchar,
        artist_name          varchar
    );
";

// FACT AND DIMENSION TABLES

pub const F_SONGPLAY_CREATE: &str = "
    create table if not exists f_songplays
    (
        songplay_id     integer         identity(0,1)   primary key,
        start_time      timestamp       not null        sortkey distkey,
        user_id         integer         not null,
        level           varchar         not null,
        song_id         varchar         not null,
        artist_id       varchar         not null,
        session_id      integer                 ,
        location        varchar                 ,
        user_agent      varchar
    );
";

pub const D_USER_CREATE: &str = "
    create table if not exists d_users
    (
        user_id         integer         primary key,
        first_name      varchar         not null,
        last_name       varchar         not null,
        gender          varchar         not null,
        level           varchar                  sortkey
    );
";

pub const D_SONG_CREATE: &str = "
    create table if not exists d_songs
    (
        song_id         varchar         primary key,
        title           varchar         not null sortkey,
        artist_id       varchar         not null,
        year            integer         not null,
        duration        float
    );
";

pub const D_ARTIST_CREATE: &str = "
    create table if not exists d_artists
    (
        artist_id       varchar         primary key,
        name            varchar         not null sortkey,
        location        varchar                 ,
        latitude        float                   ,
        longitude       float
    );
";

pub const D_TIME_CREATE: &str = "
    create table if not exists d_time
    (
        start_time      timestamp       primary key sortkey distkey,
        hour            integer         not null,
        day             integer         not null,
        week            integer         not null,
        month           integer         not null,
        year            integer         not null,
        weekday         varchar         not null
    );
";

// BULK COPIES
// The only statements templated from configuration: storage locations and
// the IAM role the cluster assumes to read them.

pub fn s_events_copy(storage: &StorageConfig, iam_role_arn: &str) -> String {
    format!(
        "
    copy s_events from '{}'
    credentials 'aws_iam_role={}'
    region 'us-west-2'
    format as JSON '{}'
    timeformat as 'epochmillisecs';
",
        storage.log_data, iam_role_arn, storage.log_jsonpath
    )
}

pub fn s_songs_copy(storage: &StorageConfig, iam_role_arn: &str) -> String {
    format!(
        "
    copy s_songs from '{}'
    credentials 'aws_iam_role={}'
    region 'us-west-2'
    format as JSON 'auto';
",
        storage.song_data, iam_role_arn
    )
}

// STAGING TO FINAL

pub const F_SONGPLAY_INSERT: &str = "
    insert into f_songplays (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
    select  distinct(e.ts)  as start_time,
            e.userId        as user_id,
            e.level         as level,
            s.song_id       as song_id,
            s.artist_id     as artist_id,
            e.sessionId     as session_id,
            e.location      as location,
            e.userAgent     as user_agent
    from s_events e
    join s_songs  s   on (e.song = s.title and e.artist = s.artist_name)
    and e.page  =  'NextSong';
";

pub const D_USER_INSERT: &str = "
    insert into d_users (user_id, first_name, last_name, gender, level)
    select  distinct(userId)    as user_id,
            firstName           as first_name,
            lastName            as last_name,
            gender,
            level
    from s_events
    where userId is not null
    and page  =  'NextSong';
";

pub const D_SONG_INSERT: &str = "
    insert into d_songs (song_id, title, artist_id, year, duration)
    select  distinct(song_id) as song_id,
            title,
            artist_id,
            year,
            duration
    from s_songs
    where song_id is not null;
";

pub const D_ARTIST_INSERT: &str = "
    insert into d_artists (artist_id, name, location, latitude, longitude)
    select  distinct(artist_id) as artist_id,
            artist_name         as name,
            artist_location     as location,
            artist_latitude     as latitude,
            artist_longitude    as longitude
    from s_songs
    where artist_id is not null;
";

pub const D_TIME_INSERT: &str = "
    insert into d_time (start_time, hour, day, week, month, year, weekday)
    select  distinct(start_time)                as start_time,
            extract(hour from start_time)       as hour,
            extract(day from start_time)        as day,
            extract(week from start_time)       as week,
            extract(month from start_time)      as month,
            extract(year from start_time)       as year,
            extract(dayofweek from start_time)  as weekday
    from f_songplays;
";
